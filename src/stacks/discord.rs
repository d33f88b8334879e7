// Copyright (c) 2025 - Cowboy AI, Inc.
//! DiscordRedirect stack: `discord.<root>` answers with a redirect to the
//! community invite
//!
//! Only the origin lives here; the alias record is declared by the Dns stack.

use crate::config::{DiscordConfig, Environment};
use crate::constructs::make_inline_function;
use crate::domain::{Handle, Hostname};
use crate::errors::CompositionResult;
use crate::resources::{ApiEndpoint, Certificate};
use crate::stack::{Built, Stack};
use crate::stacks::qualify;

const API_NAME: &str = "discord-redirect";

/// Handler source answering every request with a permanent redirect
fn redirect_source(location: &str) -> String {
    format!(
        r#"exports.handler = async (event) => {{
  return {{
    statusCode: 301,
    headers: {{
      Location: "{}"
    }}
  }};
}};
"#,
        location
    )
}

pub struct DiscordRedirectStack;

impl DiscordRedirectStack {
    pub const NAME: &'static str = "DiscordRedirect";

    pub fn build(
        environment: &Environment,
        root: &Hostname,
        config: &DiscordConfig,
        certificate: &Handle<Certificate>,
    ) -> CompositionResult<Built<Handle<ApiEndpoint>>> {
        let mut stack = Stack::new(Self::NAME, environment);

        let function = make_inline_function("Lambda", &redirect_source(&config.invite_url))?;
        let function_handle = stack.declare("Lambda", function)?;

        let endpoint = ApiEndpoint::new(
            API_NAME,
            qualify(root, &config.subdomain)?,
            certificate,
            &function_handle,
        );
        let api = stack.declare("Api", endpoint)?;

        Ok(Built::new(stack, api))
    }
}
