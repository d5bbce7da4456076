//! Owned join records and borrowed views
//!
//! Sprint 2: scoped access to the OS join-info allocation
//!
//! `NetGetAadJoinInformation` hands back a single OS-owned allocation that
//! must be released exactly once through `NetFreeAadJoinInformation`.
//! [`JoinInfo`] owns that allocation and frees it on drop; everything read
//! out of it is either copied into Rust-owned storage or borrowed through
//! a view whose lifetime is tied to the guard. Neither view can outlive
//! the record it reads from.

use std::fmt;
use std::slice;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ffi::{
    CERT_CONTEXT, DSREG_DEVICE_JOIN, DSREG_JOIN_TYPE, DSREG_UNKNOWN_JOIN, DSREG_USER_INFO,
    DSREG_WORKPLACE_JOIN, PKCS_7_ASN_ENCODING, X509_ASN_ENCODING,
};
use crate::wide::from_wide_ptr;

#[cfg(windows)]
use std::ptr::{self, NonNull};

#[cfg(windows)]
use tracing::debug;

#[cfg(windows)]
use crate::error::{JoinError, Result};
#[cfg(windows)]
use crate::ffi::{DSREG_JOIN_INFO, NetFreeAadJoinInformation, NetGetAadJoinInformation};
#[cfg(windows)]
use crate::hresult::{Hresult, S_OK};
#[cfg(windows)]
use crate::wide::to_wide;

/// Tracing target for the raw API boundary.
#[cfg(windows)]
const TRACING_TARGET: &str = "enlace::netapi32";

/// How the device is joined to Entra ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    /// Not joined, or the OS reported a discriminant we do not know.
    Unknown,
    /// Full device join (the machine identity lives in the tenant).
    Device,
    /// Workplace join (a user registered the device, machine stays local).
    Workplace,
}

impl JoinType {
    /// Decode the raw discriminant. Total: out-of-range values map to
    /// `Unknown` rather than failing, matching how the OS itself treats
    /// an unrecognized state.
    pub fn from_raw(raw: DSREG_JOIN_TYPE) -> JoinType {
        match raw {
            DSREG_DEVICE_JOIN => JoinType::Device,
            DSREG_WORKPLACE_JOIN => JoinType::Workplace,
            _ => JoinType::Unknown,
        }
    }

    /// The wire discriminant for this join type.
    pub fn as_raw(self) -> DSREG_JOIN_TYPE {
        match self {
            JoinType::Unknown => DSREG_UNKNOWN_JOIN,
            JoinType::Device => DSREG_DEVICE_JOIN,
            JoinType::Workplace => DSREG_WORKPLACE_JOIN,
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JoinType::Unknown => "unknown",
            JoinType::Device => "device",
            JoinType::Workplace => "workplace",
        };
        f.write_str(s)
    }
}

/// Borrowed view of the signed-in user block of a join record.
///
/// Only present for workplace-joined devices (and device-joined devices
/// with an active cloud session). All accessors copy out; nothing borrowed
/// from the OS escapes the view's lifetime.
pub struct UserInfo<'a> {
    raw: &'a DSREG_USER_INFO,
}

impl<'a> UserInfo<'a> {
    /// Wrap a raw user-info block.
    ///
    /// # Safety
    /// Every non-null pointer in `raw` must reference a readable
    /// null-terminated wide string that stays valid for `'a`.
    pub unsafe fn from_raw(raw: &'a DSREG_USER_INFO) -> UserInfo<'a> {
        UserInfo { raw }
    }

    /// Email address of the user who joined the device.
    pub fn email(&self) -> Option<String> {
        // SAFETY: validity for 'a was promised at construction.
        unsafe { from_wide_ptr(self.raw.pszUserEmail) }
    }

    /// Identifier of the user's registered key.
    pub fn key_id(&self) -> Option<String> {
        // SAFETY: validity for 'a was promised at construction.
        unsafe { from_wide_ptr(self.raw.pszUserKeyId) }
    }

    /// Name of the user's registered key.
    pub fn key_name(&self) -> Option<String> {
        // SAFETY: validity for 'a was promised at construction.
        unsafe { from_wide_ptr(self.raw.pszUserKeyName) }
    }
}

impl fmt::Debug for UserInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserInfo")
            .field("email", &self.email())
            .field("key_id", &self.key_id())
            .field("key_name", &self.key_name())
            .finish()
    }
}

/// Borrowed view of the certificate the device was joined with.
///
/// The certificate bytes are treated as an opaque DER blob; nothing here
/// parses X.509 structure.
pub struct JoinCertificate<'a> {
    raw: &'a CERT_CONTEXT,
}

impl<'a> JoinCertificate<'a> {
    /// Wrap a raw certificate context.
    ///
    /// # Safety
    /// `raw.pbCertEncoded` must be null or point to `raw.cbCertEncoded`
    /// readable bytes that stay valid for `'a`.
    pub unsafe fn from_raw(raw: &'a CERT_CONTEXT) -> JoinCertificate<'a> {
        JoinCertificate { raw }
    }

    /// Raw `dwCertEncodingType` value.
    pub fn encoding_type(&self) -> u32 {
        self.raw.dwCertEncodingType
    }

    /// Size in bytes of the encoded certificate.
    pub fn size(&self) -> u32 {
        self.raw.cbCertEncoded
    }

    /// The encoded certificate bytes. Empty when the record carries a null
    /// buffer or a zero length.
    pub fn encoded(&self) -> &'a [u8] {
        if self.raw.pbCertEncoded.is_null() || self.raw.cbCertEncoded == 0 {
            return &[];
        }
        // SAFETY: non-null buffer of cbCertEncoded bytes, valid for 'a,
        // as promised at construction.
        unsafe { slice::from_raw_parts(self.raw.pbCertEncoded, self.raw.cbCertEncoded as usize) }
    }

    /// SHA-256 digest of the encoded bytes, uppercase hex. `None` when
    /// there are no bytes to digest.
    pub fn sha256_thumbprint(&self) -> Option<String> {
        let der = self.encoded();
        if der.is_empty() {
            return None;
        }
        Some(hex::encode_upper(Sha256::digest(der)))
    }
}

impl fmt::Debug for JoinCertificate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinCertificate")
            .field("encoding_type", &self.encoding_type())
            .field("size", &self.size())
            .field("sha256_thumbprint", &self.sha256_thumbprint())
            .finish()
    }
}

/// Map a `dwCertEncodingType` value to its symbolic name.
pub fn encoding_name(encoding_type: u32) -> Option<&'static str> {
    let name = match encoding_type {
        X509_ASN_ENCODING => "X509_ASN_ENCODING",
        PKCS_7_ASN_ENCODING => "PKCS_7_ASN_ENCODING",
        0x0001_0001 => "X509_ASN_ENCODING | PKCS_7_ASN_ENCODING",
        _ => return None,
    };
    Some(name)
}

/// Owned handle to the OS join-info allocation.
///
/// Constructed only through [`JoinInfo::query`]; releases the allocation
/// through `NetFreeAadJoinInformation` when dropped. String accessors copy
/// out, the [`user_info`](JoinInfo::user_info) and
/// [`certificate`](JoinInfo::certificate) views borrow from `self`.
#[cfg(windows)]
pub struct JoinInfo {
    raw: NonNull<DSREG_JOIN_INFO>,
}

#[cfg(windows)]
impl JoinInfo {
    /// Ask the OS for the device's Entra ID join information.
    ///
    /// `tenant_id` scopes the query to one tenant; `None` asks about the
    /// tenant the device is currently joined to. An empty string is passed
    /// through verbatim, not treated as `None`.
    ///
    /// Returns [`JoinError::Api`] with the raw HRESULT when the call
    /// reports anything but `S_OK`, and [`JoinError::NoJoinInfo`] when it
    /// reports success without producing a record.
    pub fn query(tenant_id: Option<&str>) -> Result<JoinInfo> {
        let tenant_wide = tenant_id.map(to_wide);
        let tenant_ptr = tenant_wide
            .as_ref()
            .map_or(ptr::null(), |w| w.as_ptr());

        let mut out: *mut DSREG_JOIN_INFO = ptr::null_mut();
        debug!(
            target: TRACING_TARGET,
            tenant = tenant_id.unwrap_or("<joined tenant>"),
            "calling NetGetAadJoinInformation"
        );
        // SAFETY: tenant_ptr is null or points into tenant_wide, which
        // lives past the call; out is a valid out-pointer.
        let hr = unsafe { NetGetAadJoinInformation(tenant_ptr, &mut out) };
        if hr != S_OK {
            let status = Hresult(hr);
            debug!(
                target: TRACING_TARGET,
                hresult = %status,
                os_message = status.system_message().as_deref().unwrap_or("<none>"),
                "NetGetAadJoinInformation failed"
            );
            return Err(JoinError::Api(status));
        }
        match NonNull::new(out) {
            Some(raw) => {
                debug!(target: TRACING_TARGET, "received join record");
                Ok(JoinInfo { raw })
            }
            None => {
                debug!(
                    target: TRACING_TARGET,
                    "S_OK but no record; treating as not joined"
                );
                Err(JoinError::NoJoinInfo)
            }
        }
    }

    pub(crate) fn raw(&self) -> &DSREG_JOIN_INFO {
        // SAFETY: raw is non-null and stays valid until Drop frees it.
        unsafe { self.raw.as_ref() }
    }

    /// How the device is joined.
    pub fn join_type(&self) -> JoinType {
        JoinType::from_raw(self.raw().joinType)
    }

    /// Device identifier within the tenant.
    pub fn device_id(&self) -> Option<String> {
        // SAFETY: field points into the live OS allocation.
        unsafe { from_wide_ptr(self.raw().pszDeviceId) }
    }

    /// Identity-provider domain, `login.windows.net` for Entra ID.
    pub fn idp_domain(&self) -> Option<String> {
        // SAFETY: field points into the live OS allocation.
        unsafe { from_wide_ptr(self.raw().pszIdpDomain) }
    }

    /// Tenant the device is joined to.
    pub fn tenant_id(&self) -> Option<String> {
        // SAFETY: field points into the live OS allocation.
        unsafe { from_wide_ptr(self.raw().pszTenantId) }
    }

    /// Email address used to perform the join.
    pub fn join_user_email(&self) -> Option<String> {
        // SAFETY: field points into the live OS allocation.
        unsafe { from_wide_ptr(self.raw().pszJoinUserEmail) }
    }

    /// Display name of the tenant.
    pub fn tenant_display_name(&self) -> Option<String> {
        // SAFETY: field points into the live OS allocation.
        unsafe { from_wide_ptr(self.raw().pszTenantDisplayName) }
    }

    /// MDM enrollment endpoint.
    pub fn mdm_enrollment_url(&self) -> Option<String> {
        // SAFETY: field points into the live OS allocation.
        unsafe { from_wide_ptr(self.raw().pszMdmEnrollmentUrl) }
    }

    /// MDM terms-of-use endpoint.
    pub fn mdm_terms_of_use_url(&self) -> Option<String> {
        // SAFETY: field points into the live OS allocation.
        unsafe { from_wide_ptr(self.raw().pszMdmTermsOfUseUrl) }
    }

    /// MDM compliance endpoint.
    pub fn mdm_compliance_url(&self) -> Option<String> {
        // SAFETY: field points into the live OS allocation.
        unsafe { from_wide_ptr(self.raw().pszMdmComplianceUrl) }
    }

    /// Enterprise settings-sync endpoint.
    pub fn user_setting_sync_url(&self) -> Option<String> {
        // SAFETY: field points into the live OS allocation.
        unsafe { from_wide_ptr(self.raw().pszUserSettingSyncUrl) }
    }

    /// The signed-in user block, when the record carries one.
    pub fn user_info(&self) -> Option<UserInfo<'_>> {
        let p = self.raw().pUserInfo;
        if p.is_null() {
            return None;
        }
        // SAFETY: non-null pointer into the live OS allocation; the view
        // borrows self, so it cannot outlive the record.
        Some(unsafe { UserInfo::from_raw(&*p) })
    }

    /// The join certificate, when the record carries one.
    pub fn certificate(&self) -> Option<JoinCertificate<'_>> {
        let p = self.raw().pJoinCertificate;
        if p.is_null() {
            return None;
        }
        // SAFETY: non-null pointer into the live OS allocation; the view
        // borrows self, so it cannot outlive the record.
        Some(unsafe { JoinCertificate::from_raw(&*p) })
    }
}

#[cfg(windows)]
impl Drop for JoinInfo {
    fn drop(&mut self) {
        debug!(target: TRACING_TARGET, "releasing join record");
        // SAFETY: raw came from NetGetAadJoinInformation and is freed
        // exactly once, here.
        unsafe { NetFreeAadJoinInformation(self.raw.as_ptr()) };
    }
}

#[cfg(windows)]
impl fmt::Debug for JoinInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinInfo")
            .field("join_type", &self.join_type())
            .field("device_id", &self.device_id())
            .field("tenant_id", &self.tenant_id())
            .finish_non_exhaustive()
    }
}
