//! Periodic heartbeat emitter.
//!
//! A [`Heartbeat`] is created from the startup configuration and does nothing
//! until [`Heartbeat::start`] consumes it and spawns the background task. From
//! then on it emits one line per interval until the runtime shuts down. The
//! task shares nothing with the HTTP side except the log sink.

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

use crate::{
    config::ConfigError,
    models::Level,
    sink::{LogEvent, LogSink, Origin},
};

/// Settings of the periodic emission, fixed for the life of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct HeartbeatConfig {
    // ---
    pub level: Level,
    pub message: String,
    /// Always strictly positive once validated by `Config::from_args`.
    pub interval: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        HeartbeatConfig {
            level: Level::Info,
            message: "System heartbeat".to_string(),
            interval: Duration::from_secs(10),
        }
    }
}

/// Heartbeat that has not been started yet.
pub struct Heartbeat {
    config: HeartbeatConfig,
    sink: Arc<dyn LogSink>,
}

impl Heartbeat {
    // ---
    /// A zero interval is rejected rather than emitting in a busy loop.
    pub fn new(config: HeartbeatConfig, sink: Arc<dyn LogSink>) -> Result<Self, ConfigError> {
        // ---
        if config.interval.is_zero() {
            return Err(ConfigError::NonPositiveInterval("0".to_string()));
        }
        Ok(Heartbeat { config, sink })
    }

    /// Spawn the emitter on the current tokio runtime.
    ///
    /// The first line is written one full interval after startup. The task
    /// never finishes on its own.
    pub fn start(self) -> JoinHandle<()> {
        // ---
        let Heartbeat { config, sink } = self;
        tracing::info!(
            heartbeat_level = %config.level,
            heartbeat_message = %config.message,
            interval_secs = config.interval.as_secs_f64(),
            "Starting periodic heartbeat"
        );

        tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + config.interval, config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                sink.emit(&LogEvent::new(
                    config.level,
                    &config.message,
                    Origin::Heartbeat,
                ));
            }
        })
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::sink::MemorySink;

    fn heartbeat(interval: Duration) -> (Arc<MemorySink>, Heartbeat) {
        // ---
        let sink = Arc::new(MemorySink::new());
        let config = HeartbeatConfig {
            level: Level::Warning,
            message: "still alive".to_string(),
            interval,
        };
        let hb = Heartbeat::new(config, sink.clone()).unwrap();
        (sink, hb)
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_emission_per_interval() {
        // ---
        let (sink, hb) = heartbeat(Duration::from_secs(1));
        let handle = hb.start();

        time::sleep(Duration::from_millis(5_500)).await;

        let events = sink.events();
        assert!(
            (4..=6).contains(&events.len()),
            "expected about 5 heartbeats, got {}",
            events.len()
        );
        for event in &events {
            assert_eq!(event.level, Level::Warning);
            assert_eq!(event.message, "still alive");
            assert_eq!(event.origin, Origin::Heartbeat);
        }

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_one_interval_before_first_emission() {
        // ---
        let (sink, hb) = heartbeat(Duration::from_secs(10));
        let handle = hb.start();

        time::sleep(Duration::from_secs(9)).await;
        assert!(sink.is_empty());

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(sink.len(), 1);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_fractional_interval() {
        // ---
        let (sink, hb) = heartbeat(Duration::from_millis(250));
        let handle = hb.start();

        time::sleep(Duration::from_millis(1_100)).await;
        assert_eq!(sink.len(), 4);

        handle.abort();
    }

    #[test]
    fn test_zero_interval_rejected() {
        // ---
        let config = HeartbeatConfig {
            interval: Duration::ZERO,
            ..HeartbeatConfig::default()
        };
        let result = Heartbeat::new(config, Arc::new(MemorySink::new()));
        assert!(matches!(result, Err(ConfigError::NonPositiveInterval(_))));
    }

    #[test]
    fn test_default_config() {
        // ---
        let config = HeartbeatConfig::default();
        assert_eq!(config.level, Level::Info);
        assert_eq!(config.message, "System heartbeat");
        assert_eq!(config.interval, Duration::from_secs(10));
    }
}
