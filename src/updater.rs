use std::convert::Infallible;

use log::info;
use tokio::time::{sleep, Duration};

use crate::cloudflare::CloudflareClient;
use crate::config::Config;
use crate::error::Error;
use crate::public_ip::PublicIpResolver;

pub const POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, PartialEq, Eq)]
pub enum Check {
    Unchanged,
    Updated { from: String, to: String },
}

pub struct Updater {
    cloudflare: CloudflareClient,
    resolver: PublicIpResolver,
    zone_id: String,
    record_id: String,
    record_name: String,
    current_address: String,
}

impl Updater {
    pub async fn init(
        config: Config,
        cloudflare: CloudflareClient,
        resolver: PublicIpResolver,
    ) -> Result<Self, Error> {
        info!("getting current record value");
        let current_address = cloudflare
            .get_record_content(&config.zone_id, &config.record_id)
            .await?;
        info!("current record value: {}", current_address);

        Ok(Self {
            cloudflare,
            resolver,
            zone_id: config.zone_id,
            record_id: config.record_id,
            record_name: config.record_name,
            current_address,
        })
    }

    // sleeps before every check, including the first
    pub async fn run(mut self) -> Result<Infallible, Error> {
        loop {
            info!("sleeping for {} seconds", POLL_INTERVAL.as_secs());
            sleep(POLL_INTERVAL).await;

            if let Check::Updated { from, to } = self.check_once().await? {
                info!("updated {} successfully: {} -> {}", self.record_name, from, to);
            }
        }
    }

    pub async fn check_once(&mut self) -> Result<Check, Error> {
        info!("getting current public ip");
        let public_ip = self.resolver.current().await?;

        if public_ip == self.current_address {
            info!("public ip has not changed: {}", public_ip);
            return Ok(Check::Unchanged);
        }

        info!(
            "dynamic ip drift detected: {} -> {}",
            self.current_address, public_ip
        );
        self.cloudflare
            .update_record(&self.zone_id, &self.record_id, &self.record_name, &public_ip)
            .await?;
        let from = std::mem::replace(&mut self.current_address, public_ip.clone());
        Ok(Check::Updated {
            from,
            to: public_ip,
        })
    }
}
