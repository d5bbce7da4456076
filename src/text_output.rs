//! Human-readable status report
//!
//! Sprint 4: --format text implementation
//!
//! Renders a [`DeviceState`] the way the platform's own diagnostics
//! present join state: boxed section headers followed by right-aligned
//! `label : value` lines. Absent fields are skipped; sections with
//! nothing to say are skipped entirely.

use crate::join_info::encoding_name;
use crate::status::DeviceState;

/// Interior width of a section header box.
const BOX_WIDTH: usize = 70;

/// Width of the right-aligned label column.
const LABEL_WIDTH: usize = 24;

fn section(out: &mut String, title: &str) {
    let bar = "-".repeat(BOX_WIDTH);
    out.push_str(&format!("+{bar}+\n"));
    out.push_str(&format!("| {:<width$} |\n", title, width = BOX_WIDTH - 2));
    out.push_str(&format!("+{bar}+\n\n"));
}

fn field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("{:>width$} : {}\n", label, value, width = LABEL_WIDTH));
}

fn opt_field(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(v) = value {
        field(out, label, v);
    }
}

/// Render a snapshot as a sectioned text report.
///
/// The report always opens with a Device State section; Tenant Details,
/// User State, and Join Certificate sections appear only when the
/// snapshot carries something for them.
pub fn render(state: &DeviceState) -> String {
    let mut out = String::new();

    section(&mut out, "Device State");
    field(&mut out, "Join Type", &state.join_type.to_string());
    opt_field(&mut out, "Device ID", state.device_id.as_deref());
    opt_field(&mut out, "Idp Domain", state.idp_domain.as_deref());
    out.push('\n');

    let has_tenant_details = state.tenant_id.is_some()
        || state.tenant_display_name.is_some()
        || state.join_user_email.is_some()
        || state.mdm_enrollment_url.is_some()
        || state.mdm_terms_of_use_url.is_some()
        || state.mdm_compliance_url.is_some()
        || state.user_setting_sync_url.is_some();
    if has_tenant_details {
        section(&mut out, "Tenant Details");
        opt_field(&mut out, "Tenant ID", state.tenant_id.as_deref());
        opt_field(&mut out, "Tenant Name", state.tenant_display_name.as_deref());
        opt_field(&mut out, "Join User Email", state.join_user_email.as_deref());
        opt_field(
            &mut out,
            "MDM Enrollment URL",
            state.mdm_enrollment_url.as_deref(),
        );
        opt_field(
            &mut out,
            "MDM Terms of Use URL",
            state.mdm_terms_of_use_url.as_deref(),
        );
        opt_field(
            &mut out,
            "MDM Compliance URL",
            state.mdm_compliance_url.as_deref(),
        );
        opt_field(
            &mut out,
            "Settings Sync URL",
            state.user_setting_sync_url.as_deref(),
        );
        out.push('\n');
    }

    if let Some(user) = &state.user {
        section(&mut out, "User State");
        opt_field(&mut out, "User Email", user.email.as_deref());
        opt_field(&mut out, "User Key ID", user.key_id.as_deref());
        opt_field(&mut out, "User Key Name", user.key_name.as_deref());
        out.push('\n');
    }

    if let Some(cert) = &state.certificate {
        section(&mut out, "Join Certificate");
        let encoding = match encoding_name(cert.encoding_type) {
            Some(name) => format!("{:#x} ({name})", cert.encoding_type),
            None => format!("{:#x}", cert.encoding_type),
        };
        field(&mut out, "Encoding", &encoding);
        field(&mut out, "Size", &format!("{} bytes", cert.size));
        opt_field(
            &mut out,
            "SHA-256 Thumbprint",
            cert.thumbprint_sha256.as_deref(),
        );
        out.push('\n');
    }

    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join_info::JoinType;
    use crate::status::{CertState, UserState};

    fn device_state() -> DeviceState {
        DeviceState {
            join_type: JoinType::Device,
            device_id: Some("5f1a2b3c-9d8e-4f70-a1b2-c3d4e5f60718".to_string()),
            idp_domain: Some("login.windows.net".to_string()),
            tenant_id: Some("72f988bf-86f1-41af-91ab-2d7cd011db47".to_string()),
            join_user_email: Some("admin@contoso.com".to_string()),
            tenant_display_name: Some("Contoso Café GmbH".to_string()),
            mdm_enrollment_url: Some(
                "https://enrollment.manage.microsoft.com/enrollmentserver/discovery.svc"
                    .to_string(),
            ),
            mdm_terms_of_use_url: None,
            mdm_compliance_url: None,
            user_setting_sync_url: None,
            user: Some(UserState {
                email: Some("ana@contoso.com".to_string()),
                key_id: None,
                key_name: None,
            }),
            certificate: Some(CertState {
                encoding_type: 0x1,
                size: 1290,
                thumbprint_sha256: Some("AB".repeat(32)),
            }),
        }
    }

    #[test]
    fn test_render_full_state_has_all_sections() {
        let text = render(&device_state());
        assert!(text.contains("| Device State"));
        assert!(text.contains("| Tenant Details"));
        assert!(text.contains("| User State"));
        assert!(text.contains("| Join Certificate"));
    }

    #[test]
    fn test_render_fields() {
        let text = render(&device_state());
        assert!(text.contains("Join Type : device"));
        assert!(text.contains("Device ID : 5f1a2b3c-9d8e-4f70-a1b2-c3d4e5f60718"));
        assert!(text.contains("Tenant Name : Contoso Café GmbH"));
        assert!(text.contains("Encoding : 0x1 (X509_ASN_ENCODING)"));
        assert!(text.contains("Size : 1290 bytes"));
        assert!(text.contains(&"AB".repeat(32)));
    }

    #[test]
    fn test_render_label_alignment() {
        let text = render(&device_state());
        // Labels sit in a 24-column right-aligned gutter.
        assert!(text.contains("               Join Type : device"));
        assert!(text.contains("      MDM Enrollment URL : https://"));
    }

    #[test]
    fn test_render_minimal_state_skips_sections() {
        let state = DeviceState {
            join_type: JoinType::Workplace,
            device_id: None,
            idp_domain: None,
            tenant_id: None,
            join_user_email: None,
            tenant_display_name: None,
            mdm_enrollment_url: None,
            mdm_terms_of_use_url: None,
            mdm_compliance_url: None,
            user_setting_sync_url: None,
            user: None,
            certificate: None,
        };
        let text = render(&state);
        assert!(text.contains("| Device State"));
        assert!(text.contains("Join Type : workplace"));
        assert!(!text.contains("Tenant Details"));
        assert!(!text.contains("User State"));
        assert!(!text.contains("Join Certificate"));
    }

    #[test]
    fn test_render_box_geometry() {
        let text = render(&device_state());
        let bar = format!("+{}+", "-".repeat(BOX_WIDTH));
        assert!(text.contains(&bar));
        for line in text.lines().filter(|l| l.starts_with('|')) {
            assert_eq!(line.chars().count(), BOX_WIDTH + 2);
        }
    }

    #[test]
    fn test_render_unknown_encoding_is_plain_hex() {
        let mut state = device_state();
        state.certificate = Some(CertState {
            encoding_type: 0x4,
            size: 10,
            thumbprint_sha256: None,
        });
        let text = render(&state);
        assert!(text.contains("Encoding : 0x4\n"));
        assert!(!text.contains("SHA-256 Thumbprint"));
    }

    #[test]
    fn test_render_ends_with_single_newline() {
        let text = render(&device_state());
        assert!(text.ends_with('\n'));
        assert!(!text.ends_with("\n\n"));
    }
}
