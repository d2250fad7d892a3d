use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A caller-side contract violation, reported before any state is mutated.
    #[error("precondition not satisfied: {0}")]
    PreconditionNotSatisfied(String),
}

/// Bails out with [`Error::PreconditionNotSatisfied`], appending the failing
/// predicate's text to the message.
macro_rules! ensure {
    ($cond:expr, $msg:expr) => {
        if !($cond) {
            return Err($crate::error::Error::PreconditionNotSatisfied(format!(
                concat!($msg, " ({})"),
                stringify!($cond)
            )));
        }
    };
}

pub(crate) use ensure;

#[cfg(test)]
mod tests {
    use super::*;

    fn check(flag: bool) -> Result<()> {
        ensure!(flag, "obviously not");
        Ok(())
    }

    #[test]
    fn test_message_carries_predicate() {
        let err = check(false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "precondition not satisfied: obviously not (flag)"
        );
        assert!(check(true).is_ok());
    }
}
