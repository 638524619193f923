use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimerError {
    #[error("{control} is not supported by the {driver} driver")]
    UnsupportedControl {
        control: &'static str,
        driver: &'static str,
    },
    #[error("timer host is detached")]
    HostDetached,
}
