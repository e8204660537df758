//! `outlook-mcp status`: show the resolved configuration.

use outlook_mcp_services::endpoint;
use outlook_mcp_types::MailConfig;

pub fn run(config: &MailConfig) {
    print!("{}", render(config));
}

fn render(config: &MailConfig) -> String {
    let or_unset = |v: &str| if v.is_empty() { "(not set)".to_string() } else { v.to_string() };
    let secret = if config.client_secret.is_empty() {
        "(not set)".to_string()
    } else {
        config.client_secret.to_string()
    };

    let mut out = String::new();
    out.push_str("outlook-mcp status\n");
    out.push_str("==================\n\n");
    out.push_str(&format!("  Sender:          {}\n", or_unset(&config.sender_email_id)));
    out.push_str(&format!("  Tenant:          {}\n", or_unset(&config.tenant_id)));
    out.push_str(&format!("  Client ID:       {}\n", or_unset(&config.client_id)));
    out.push_str(&format!("  Client secret:   {secret}\n"));
    out.push_str(&format!("  Scope:           {}\n", config.scope));
    out.push_str(&format!("  Token endpoint:  {}\n", or_invalid(endpoint::token_url(config))));
    out.push_str(&format!("  Send endpoint:   {}\n", or_invalid(endpoint::send_mail_url(config))));

    let missing = config.missing_fields();
    out.push('\n');
    if missing.is_empty() {
        out.push_str("All required settings are present.\n");
    } else {
        out.push_str("Missing:\n");
        for field in missing {
            out.push_str(&format!("  - {field}\n"));
        }
    }
    out
}

fn or_invalid<T: std::fmt::Display>(url: outlook_mcp_services::Result<T>) -> String {
    match url {
        Ok(url) => url.to_string(),
        Err(e) => format!("({e})"),
    }
}
