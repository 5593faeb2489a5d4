//! Heart Rate Monitor
//!
//! Connects to a heart rate sensor, prints its body sensor location and then one
//! report per heart rate notification.
//!
//! Pass the Bluetooth address or name of the sensor as the first argument, and
//! optionally a JSON driver configuration as the second:
//!
//! ```text
//! cargo run --example heart_rate_monitor -- "Polar H10 1234ABCD" driver.json
//! ```

use anyhow::{anyhow, Context, Result};
use btleplug::api::{Central, Manager as _, Peripheral as _, ScanFilter};
use btleplug::platform::{Manager, Peripheral};
use env_logger::Env;
use hrs_decoder::{
    DriverConfig, HeartRateDriver, HeartRateEvent, HeartRateReport, PeripheralTransport,
};
use log::{error, info};
use std::time::Duration;

async fn find_peripheral(target: &str) -> Result<Peripheral> {
    let manager = Manager::new().await?;
    let adapter = manager
        .adapters()
        .await?
        .into_iter()
        .next()
        .ok_or(anyhow!("No Bluetooth adapter found"))?;
    adapter.start_scan(ScanFilter::default()).await?;

    for _ in 0..10 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        for peripheral in adapter.peripherals().await? {
            let name = peripheral
                .properties()
                .await?
                .and_then(|props| props.local_name)
                .unwrap_or_default();
            if name == target || peripheral.address().to_string().eq_ignore_ascii_case(target) {
                adapter.stop_scan().await?;
                return Ok(peripheral);
            }
        }
    }
    Err(anyhow!("Peripheral {} not found", target))
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let target = args
        .next()
        .context("usage: heart_rate_monitor <address or name> [config.json]")?;
    let config = match args.next() {
        Some(path) => DriverConfig::load(path)?,
        None => DriverConfig::default(),
    };

    env_logger::Builder::from_env(
        Env::default()
            .filter_or("HRS_LOG_LEVEL", config.log_level.as_str())
            .write_style_or("HRS_LOG_STYLE", "always"),
    )
    .init();

    let peripheral = find_peripheral(&target).await?;
    peripheral.connect().await?;
    peripheral.discover_services().await?;
    info!("Connected to {}", target);

    let driver = HeartRateDriver::from_config(PeripheralTransport::new(peripheral), &config);

    println!("=== Body Sensor Location ===");
    match driver.body_sensor_location().await {
        Ok(location) => println!("Body sensor location: {}", location),
        Err(e) => error!("{}: {}", driver.name(), e),
    }

    println!("=== Heart Rate ===");
    let mut subscription = driver.subscribe_heart_rate().await?;
    while let Some(event) = subscription.recv().await {
        if let HeartRateEvent::Measurement(measurement) = event {
            println!("{}", HeartRateReport::now(measurement));
        }
    }
    Ok(())
}
