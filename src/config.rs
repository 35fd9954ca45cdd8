use std::fmt;

use clap::Parser;

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "CLOUDFLARE_API_KEY";
pub const ZONE_ID_VAR: &str = "CLOUDFLARE_ZONE_ID";
pub const RECORD_ID_VAR: &str = "CLOUDFLARE_RECORD_ID";
pub const RECORD_NAME_VAR: &str = "CLOUDFLARE_RECORD_NAME";

#[derive(Parser, Default)]
#[clap(
    name = "cf-ddns",
    version,
    about = "Keeps a Cloudflare DNS A RECORD pointed at this host's public IPv4 address"
)]
pub struct Args {
    #[clap(long, env = API_KEY_VAR, hide_env_values = true, help = "API TOKEN\t(Zone:DNS:Edit)")]
    pub api_key: Option<String>,

    #[clap(long, env = ZONE_ID_VAR, help = "ZONE ID\t(see Cloudflare dashboard overview)")]
    pub zone_id: Option<String>,

    #[clap(long, env = RECORD_ID_VAR, help = "DNS RECORD ID\t(id of the A record to keep current)")]
    pub record_id: Option<String>,

    #[clap(long, env = RECORD_NAME_VAR, help = "RECORD NAME\t(ex. 'home.example.com')")]
    pub record_name: Option<String>,
}

pub struct Config {
    pub api_key: String,
    pub zone_id: String,
    pub record_id: String,
    pub record_name: String,
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        Ok(Config {
            api_key: required(args.api_key, API_KEY_VAR)?,
            zone_id: required(args.zone_id, ZONE_ID_VAR)?,
            record_id: required(args.record_id, RECORD_ID_VAR)?,
            record_name: required(args.record_name, RECORD_NAME_VAR)?,
        })
    }
}

// the token must never reach the log
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<REDACTED>")
            .field("zone_id", &self.zone_id)
            .field("record_id", &self.record_id)
            .field("record_name", &self.record_name)
            .finish()
    }
}

fn required(value: Option<String>, var: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(var)),
    }
}
