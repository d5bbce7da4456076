// Sprint 3: Integration Test Utilities
//
// Builders for synthetic join records backed entirely by Rust-owned
// storage. Every pointer in the record targets a heap allocation held
// by the builder, so the record stays valid while it is moved around.

#![allow(dead_code)]

use enlace::ffi::{
    CERT_CONTEXT, DSREG_DEVICE_JOIN, DSREG_JOIN_INFO, DSREG_USER_INFO, DSREG_WORKPLACE_JOIN,
    X509_ASN_ENCODING,
};
use enlace::wide::to_wide;

pub const DEVICE_ID: &str = "5f1a2b3c-9d8e-4f70-a1b2-c3d4e5f60718";
pub const IDP_DOMAIN: &str = "login.windows.net";
pub const TENANT_ID: &str = "72f988bf-86f1-41af-91ab-2d7cd011db47";
pub const JOIN_USER_EMAIL: &str = "jürgen.müller@contoso.com";
pub const TENANT_DISPLAY_NAME: &str = "Contoso Café 株式会社";
pub const MDM_ENROLLMENT_URL: &str =
    "https://enrollment.manage.microsoft.com/enrollmentserver/discovery.svc";
pub const MDM_TERMS_OF_USE_URL: &str = "https://portal.manage.microsoft.com/TermsofUse.aspx";
pub const MDM_COMPLIANCE_URL: &str =
    "https://portal.manage.microsoft.com/?portalAction=Compliance";
pub const USER_SETTING_SYNC_URL: &str = "https://sync.contoso.com/enterpriseregistration";
pub const USER_EMAIL: &str = "ana.lucía@contoso.com";
pub const USER_KEY_ID: &str = "6ab2cd34-ef56-4a78-9b0c-d1e2f3a4b5c6";
pub const USER_KEY_NAME: &str = "ngcKeySignature";

/// A join record whose pointers all target storage owned by this struct.
///
/// The record, its optional blocks, the certificate bytes, and the wide
/// strings live on the heap; moving the builder never moves them.
pub struct SyntheticJoinInfo {
    record: Box<DSREG_JOIN_INFO>,
    user: Option<Box<DSREG_USER_INFO>>,
    cert: Option<Box<CERT_CONTEXT>>,
    cert_bytes: Vec<u8>,
    strings: Vec<Vec<u16>>,
}

fn keep(strings: &mut Vec<Vec<u16>>, s: &str) -> *mut u16 {
    let w = to_wide(s);
    let ptr = w.as_ptr() as *mut u16;
    strings.push(w);
    ptr
}

/// A DER-ish blob for certificate fields. Never parsed, only digested.
pub fn fake_der() -> Vec<u8> {
    let mut der = vec![0x30, 0x82, 0x01, 0x00];
    der.extend(0..=255u8);
    der
}

impl SyntheticJoinInfo {
    /// A fully populated device-joined record: all nine strings, a user
    /// block, and a certificate.
    pub fn device_joined() -> SyntheticJoinInfo {
        let mut strings = Vec::new();

        let user = Box::new(DSREG_USER_INFO {
            pszUserEmail: keep(&mut strings, USER_EMAIL),
            pszUserKeyId: keep(&mut strings, USER_KEY_ID),
            pszUserKeyName: keep(&mut strings, USER_KEY_NAME),
        });

        let cert_bytes = fake_der();
        let cert = Box::new(CERT_CONTEXT {
            dwCertEncodingType: X509_ASN_ENCODING,
            pbCertEncoded: cert_bytes.as_ptr() as *mut u8,
            cbCertEncoded: cert_bytes.len() as u32,
            pCertInfo: std::ptr::null_mut(),
            hCertStore: std::ptr::null_mut(),
        });

        let record = Box::new(DSREG_JOIN_INFO {
            joinType: DSREG_DEVICE_JOIN,
            pJoinCertificate: &*cert as *const CERT_CONTEXT as *mut CERT_CONTEXT,
            pszDeviceId: keep(&mut strings, DEVICE_ID),
            pszIdpDomain: keep(&mut strings, IDP_DOMAIN),
            pszTenantId: keep(&mut strings, TENANT_ID),
            pszJoinUserEmail: keep(&mut strings, JOIN_USER_EMAIL),
            pszTenantDisplayName: keep(&mut strings, TENANT_DISPLAY_NAME),
            pszMdmEnrollmentUrl: keep(&mut strings, MDM_ENROLLMENT_URL),
            pszMdmTermsOfUseUrl: keep(&mut strings, MDM_TERMS_OF_USE_URL),
            pszMdmComplianceUrl: keep(&mut strings, MDM_COMPLIANCE_URL),
            pszUserSettingSyncUrl: keep(&mut strings, USER_SETTING_SYNC_URL),
            pUserInfo: &*user as *const DSREG_USER_INFO as *mut DSREG_USER_INFO,
        });

        SyntheticJoinInfo {
            record,
            user: Some(user),
            cert: Some(cert),
            cert_bytes,
            strings,
        }
    }

    /// A sparse workplace-joined record: no user block, no certificate,
    /// most strings null, and a present-but-empty display name.
    pub fn workplace_minimal() -> SyntheticJoinInfo {
        let mut strings = Vec::new();

        let record = Box::new(DSREG_JOIN_INFO {
            joinType: DSREG_WORKPLACE_JOIN,
            pJoinCertificate: std::ptr::null_mut(),
            pszDeviceId: keep(&mut strings, DEVICE_ID),
            pszIdpDomain: std::ptr::null_mut(),
            pszTenantId: keep(&mut strings, TENANT_ID),
            pszJoinUserEmail: std::ptr::null_mut(),
            pszTenantDisplayName: keep(&mut strings, ""),
            pszMdmEnrollmentUrl: std::ptr::null_mut(),
            pszMdmTermsOfUseUrl: std::ptr::null_mut(),
            pszMdmComplianceUrl: std::ptr::null_mut(),
            pszUserSettingSyncUrl: std::ptr::null_mut(),
            pUserInfo: std::ptr::null_mut(),
        });

        SyntheticJoinInfo {
            record,
            user: None,
            cert: None,
            cert_bytes: Vec::new(),
            strings,
        }
    }

    pub fn raw(&self) -> &DSREG_JOIN_INFO {
        &self.record
    }

    pub fn cert_bytes(&self) -> &[u8] {
        &self.cert_bytes
    }

    pub fn set_join_type(&mut self, raw: i32) {
        self.record.joinType = raw;
    }
}
