use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use eq_mount_control::config::Config;
use eq_mount_control::control::{slew_status, ControlChannel};
use eq_mount_control::motor::{MotorTask, SimulatedMotors};
use eq_mount_control::mount::{EqMount, EquatorialReference, Geometry, MountIo};
use eq_mount_control::store::FileStore;

const SIM_SLEW_TIME: Duration = Duration::from_secs(2);
const REPORT_INTERVAL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();

    let config: Config = confy::load_path("config.toml")?;
    let store = Arc::new(FileStore::open("mount_store.toml")?);

    let (channel, rx) = ControlChannel::new(config.control_settings.channel_capacity);
    let (reporter, slew) = slew_status();
    let motors = Arc::new(SimulatedMotors::new(&Geometry::new(&config.mount_settings)));

    let mount = EqMount::new(&config, MountIo {
        channel,
        motors: motors.clone(),
        slew: Arc::new(slew),
        store,
    })?;

    let motor_task = MotorTask::new(rx, motors, reporter, mount.subscribe_home(), SIM_SLEW_TIME);
    tokio::spawn(motor_task.run());

    mount.sync_at_home().await?;
    mount.start_tracking()?;

    let mut report = tokio::time::interval(REPORT_INTERVAL);
    loop {
        tokio::select! {
            _ = report.tick() => {
                mount.check_tracking_limits();
                let (ra, dec) = mount.get_equ(EquatorialReference::RightAscension(Utc::now()));
                let hor = mount.get_hor_app();
                tracing::info!(
                    "RA {:.4} Dec {:.4} Az {:.4} Alt {:.4} pier side {} tracking {}",
                    ra,
                    dec,
                    hor.az,
                    hor.alt,
                    mount.get_pier_side(),
                    mount.is_tracking()
                );
            }
            r = tokio::signal::ctrl_c() => {
                r?;
                break;
            }
        }
    }

    mount.stop_tracking()?;
    tracing::info!("Shutting down");
    Ok(())
}
