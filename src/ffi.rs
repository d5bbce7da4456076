//! Raw bindings to the Entra ID device-join functions of `netapi32.dll`
//!
//! Sprint 1: struct layouts and extern declarations
//!
//! The structures here mirror the native `lmjoin.h` / `wincrypt.h` layouts
//! bit for bit: sequential field order, native pointer width, UTF-16 wide
//! strings. Windows, not this crate, is the contract authority, so nothing
//! in this module interprets the data it describes: no logic, no logging,
//! no panics. The safe layer lives in [`crate::join_info`].
//!
//! Ownership contract: on a successful `NetGetAadJoinInformation` call the
//! whole `DSREG_JOIN_INFO` block, every string and both nested records
//! included, is one OS allocation. It stays owned by the OS allocator
//! until the one matching `NetFreeAadJoinInformation` call, which releases
//! all of it at once. Nothing in it may be freed individually or touched
//! afterwards.
//!
//! The struct definitions are not `cfg(windows)`-gated: they are plain
//! `#[repr(C)]` data, so layout and marshalling tests run on any host.
//! Only the extern block links against `netapi32`.

#![allow(non_snake_case, non_camel_case_types)]

use std::ffi::c_void;

/// Classification of the device's relationship to a directory tenant.
///
/// C-style enum, 32 bits wide like every Win32 enum.
pub type DSREG_JOIN_TYPE = i32;

/// The device is not joined, or the join state could not be determined.
pub const DSREG_UNKNOWN_JOIN: DSREG_JOIN_TYPE = 0;
/// The device is joined to an Entra ID (Azure AD) tenant.
pub const DSREG_DEVICE_JOIN: DSREG_JOIN_TYPE = 1;
/// A work or school account has been added on the device.
pub const DSREG_WORKPLACE_JOIN: DSREG_JOIN_TYPE = 2;

/// X.509 ASN.1 certificate encoding (`wincrypt.h`).
pub const X509_ASN_ENCODING: u32 = 0x1;
/// PKCS #7 ASN.1 encoding (`wincrypt.h`).
pub const PKCS_7_ASN_ENCODING: u32 = 0x10000;

/// User-specific join state nested inside [`DSREG_JOIN_INFO`].
///
/// All three fields are null-terminated wide strings owned by the parent
/// allocation; any of them may be null.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DSREG_USER_INFO {
    pub pszUserEmail: *mut u16,
    pub pszUserKeyId: *mut u16,
    pub pszUserKeyName: *mut u16,
}

/// Certificate context exactly as `wincrypt.h` declares it.
///
/// `pbCertEncoded` points at `cbCertEncoded` bytes of encoded certificate
/// data. `pCertInfo` and `hCertStore` are opaque to this crate; the caller
/// must not interpret or release them.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CERT_CONTEXT {
    pub dwCertEncodingType: u32,
    pub pbCertEncoded: *mut u8,
    pub cbCertEncoded: u32,
    pub pCertInfo: *mut c_void,
    pub hCertStore: *mut c_void,
}

/// Join state record returned by `NetGetAadJoinInformation` (`lmjoin.h`).
///
/// Every string field is a null-terminated wide string that may be null;
/// `pJoinCertificate` and `pUserInfo` may be null as well. All of it lives
/// inside the single OS allocation described at module level.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DSREG_JOIN_INFO {
    pub joinType: DSREG_JOIN_TYPE,
    pub pJoinCertificate: *mut CERT_CONTEXT,
    pub pszDeviceId: *mut u16,
    pub pszIdpDomain: *mut u16,
    pub pszTenantId: *mut u16,
    pub pszJoinUserEmail: *mut u16,
    pub pszTenantDisplayName: *mut u16,
    pub pszMdmEnrollmentUrl: *mut u16,
    pub pszMdmTermsOfUseUrl: *mut u16,
    pub pszMdmComplianceUrl: *mut u16,
    pub pszUserSettingSyncUrl: *mut u16,
    pub pUserInfo: *mut DSREG_USER_INFO,
}

#[cfg(windows)]
#[link(name = "netapi32")]
extern "system" {
    /// Retrieves the Entra ID join state of the local device.
    ///
    /// # Arguments
    /// - [in] `pcszTenantId`: tenant to query as a null-terminated wide
    ///   string, or a null pointer for the currently joined tenant
    /// - [out] `ppJoinInfo`: receives a pointer to a freshly OS-allocated
    ///   [`DSREG_JOIN_INFO`]
    ///
    /// # Returns
    /// An `HRESULT`: zero (`S_OK`) on success, non-zero otherwise. A device
    /// that is not joined, a tenant id that matches no known join, and any
    /// transport or permission failure all surface here uniformly as a
    /// non-zero code. On failure `*ppJoinInfo` is unusable and must not be
    /// dereferenced or released.
    ///
    /// # Safety
    /// - `pcszTenantId` must be null or point to a null-terminated UTF-16
    ///   string that outlives the call
    /// - `ppJoinInfo` must be valid for a write of `*mut DSREG_JOIN_INFO`
    pub fn NetGetAadJoinInformation(
        pcszTenantId: *const u16,
        ppJoinInfo: *mut *mut DSREG_JOIN_INFO,
    ) -> i32;

    /// Frees a join-info record and everything it transitively owns.
    ///
    /// # Safety
    /// - `pJoinInfo` must have been returned through a successful
    ///   `NetGetAadJoinInformation` call
    /// - It must not have been passed to this function before; the OS
    ///   performs no double-free protection
    /// - No field of the record, nor anything it points to, may be read
    ///   after this call returns
    pub fn NetFreeAadJoinInformation(pJoinInfo: *mut DSREG_JOIN_INFO);
}
