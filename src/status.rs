//! Owned device-state snapshots
//!
//! Sprint 3: copy-out before release
//!
//! A [`DeviceState`] is everything a join record says, copied into plain
//! Rust-owned values. Snapshots have no lifetime tie to the OS allocation,
//! so they can be rendered, serialized, and compared long after the record
//! has been freed. [`query_device_state`] is the one-call entry point the
//! binary uses.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ffi::DSREG_JOIN_INFO;
use crate::join_info::{JoinCertificate, JoinType, UserInfo};
use crate::wide::from_wide_ptr;

#[cfg(not(windows))]
use crate::error::JoinError;
#[cfg(windows)]
use crate::join_info::JoinInfo;

/// Signed-in user portion of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
}

/// Join-certificate portion of a snapshot.
///
/// Carries the encoding discriminant, the byte count the record claims,
/// and a digest of the encoded bytes. The bytes themselves are not
/// retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertState {
    pub encoding_type: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbprint_sha256: Option<String>,
}

/// Complete join state of the device, in owned storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub join_type: JoinType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mdm_enrollment_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mdm_terms_of_use_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mdm_compliance_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_setting_sync_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertState>,
}

impl DeviceState {
    /// Snapshot a raw join record.
    ///
    /// # Safety
    /// `raw` must describe a valid record for the duration of the call:
    /// every non-null string field points to a readable null-terminated
    /// wide string, `pUserInfo` and `pJoinCertificate` are null or point
    /// to valid blocks, and the certificate buffer covers the byte count
    /// it claims.
    pub unsafe fn from_raw(raw: &DSREG_JOIN_INFO) -> DeviceState {
        let user = if raw.pUserInfo.is_null() {
            None
        } else {
            // SAFETY: non-null pUserInfo points to a valid block, per the
            // caller's contract.
            let view = unsafe { UserInfo::from_raw(&*raw.pUserInfo) };
            Some(UserState {
                email: view.email(),
                key_id: view.key_id(),
                key_name: view.key_name(),
            })
        };

        let certificate = if raw.pJoinCertificate.is_null() {
            None
        } else {
            // SAFETY: non-null pJoinCertificate points to a valid context,
            // per the caller's contract.
            let view = unsafe { JoinCertificate::from_raw(&*raw.pJoinCertificate) };
            Some(CertState {
                encoding_type: view.encoding_type(),
                size: view.size(),
                thumbprint_sha256: view.sha256_thumbprint(),
            })
        };

        // SAFETY: each string field is null or a valid wide string, per
        // the caller's contract.
        unsafe {
            DeviceState {
                join_type: JoinType::from_raw(raw.joinType),
                device_id: from_wide_ptr(raw.pszDeviceId),
                idp_domain: from_wide_ptr(raw.pszIdpDomain),
                tenant_id: from_wide_ptr(raw.pszTenantId),
                join_user_email: from_wide_ptr(raw.pszJoinUserEmail),
                tenant_display_name: from_wide_ptr(raw.pszTenantDisplayName),
                mdm_enrollment_url: from_wide_ptr(raw.pszMdmEnrollmentUrl),
                mdm_terms_of_use_url: from_wide_ptr(raw.pszMdmTermsOfUseUrl),
                mdm_compliance_url: from_wide_ptr(raw.pszMdmComplianceUrl),
                user_setting_sync_url: from_wide_ptr(raw.pszUserSettingSyncUrl),
                user,
                certificate,
            }
        }
    }

    /// Snapshot a live join record.
    #[cfg(windows)]
    pub fn from_join_info(info: &JoinInfo) -> DeviceState {
        // SAFETY: a live JoinInfo guards a record the OS produced, valid
        // until the guard drops.
        unsafe { DeviceState::from_raw(info.raw()) }
    }

    /// True when the record carries an MDM enrollment endpoint.
    pub fn mdm_enrolled(&self) -> bool {
        self.mdm_enrollment_url
            .as_deref()
            .is_some_and(|url| !url.is_empty())
    }
}

/// Query the OS and return an owned snapshot of the device's join state.
///
/// `tenant_id` scopes the query to one tenant; `None` asks about the
/// tenant the device is currently joined to. The OS allocation is
/// released before this returns.
#[cfg(windows)]
pub fn query_device_state(tenant_id: Option<&str>) -> Result<DeviceState> {
    let info = JoinInfo::query(tenant_id)?;
    Ok(DeviceState::from_join_info(&info))
}

/// Query the OS and return an owned snapshot of the device's join state.
///
/// Always fails with [`JoinError::Unsupported`] on this platform; the
/// join-info API only exists on Windows.
#[cfg(not(windows))]
pub fn query_device_state(_tenant_id: Option<&str>) -> Result<DeviceState> {
    Err(JoinError::Unsupported)
}
