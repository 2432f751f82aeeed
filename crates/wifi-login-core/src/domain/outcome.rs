//! Outcome types for a single run.
//!
//! None of these map to process exit codes; they drive the console messages
//! and let tests assert which branch of the flow was taken.

use std::fmt;

/// What happened when the login flow tried to submit the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submit control was found and clicked.
    Clicked {
        /// The selector that matched.
        selector: String,
    },
    /// No candidate selector matched anything on the page.
    NoControl,
    /// A control was present but the click raised an automation error.
    ClickFailed { reason: String },
}

/// Final result of the portal login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Connectivity came back before a browser was needed.
    NotRequired,
    /// The login page redirected straight to the status page.
    AlreadyAuthenticated,
    /// After submitting, the browser landed on the status page.
    RedirectedToStatusPage { submit: SubmitOutcome },
    /// After submitting, the reachability probe succeeded.
    InternetAvailable { submit: SubmitOutcome },
    /// Neither a status-page redirect nor connectivity after submitting.
    Failed { submit: SubmitOutcome },
}

impl LoginOutcome {
    /// `true` for every variant except [`LoginOutcome::Failed`].
    pub fn is_success(&self) -> bool {
        !matches!(self, LoginOutcome::Failed { .. })
    }

    /// The submit step's result, if the flow got that far.
    pub fn submit(&self) -> Option<&SubmitOutcome> {
        match self {
            LoginOutcome::RedirectedToStatusPage { submit }
            | LoginOutcome::InternetAvailable { submit }
            | LoginOutcome::Failed { submit } => Some(submit),
            LoginOutcome::NotRequired | LoginOutcome::AlreadyAuthenticated => None,
        }
    }
}

/// Result of the whole reconnect sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The internet was reachable at start; nothing was done.
    AlreadyOnline,
    /// Joining the target network failed; the portal was not attempted.
    ConnectFailed { ssid: String },
    /// The portal login flow ran.
    Login(LoginOutcome),
}

impl RunOutcome {
    /// `true` when the run ended online or logged in.
    pub fn is_success(&self) -> bool {
        match self {
            RunOutcome::AlreadyOnline => true,
            RunOutcome::ConnectFailed { .. } => false,
            RunOutcome::Login(outcome) => outcome.is_success(),
        }
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitOutcome::Clicked { selector } => write!(f, "clicked `{selector}`"),
            SubmitOutcome::NoControl => f.write_str("no submit control found"),
            SubmitOutcome::ClickFailed { reason } => write!(f, "click failed: {reason}"),
        }
    }
}

impl fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginOutcome::NotRequired => f.write_str("internet is available; no login required"),
            LoginOutcome::AlreadyAuthenticated => f.write_str("already logged in"),
            LoginOutcome::RedirectedToStatusPage { .. } => {
                f.write_str("login successful; redirected to status page")
            }
            LoginOutcome::InternetAvailable { .. } => {
                f.write_str("login successful; internet is now available")
            }
            LoginOutcome::Failed { .. } => f.write_str(
                "login failed; internet is still unavailable or no redirect occurred",
            ),
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::AlreadyOnline => f.write_str("internet already available"),
            RunOutcome::ConnectFailed { ssid } => write!(f, "could not connect to {ssid}"),
            RunOutcome::Login(outcome) => outcome.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_is_the_only_unsuccessful_login_outcome() {
        let submit = SubmitOutcome::NoControl;
        assert!(LoginOutcome::NotRequired.is_success());
        assert!(LoginOutcome::AlreadyAuthenticated.is_success());
        assert!(LoginOutcome::RedirectedToStatusPage { submit: submit.clone() }.is_success());
        assert!(LoginOutcome::InternetAvailable { submit: submit.clone() }.is_success());
        assert!(!LoginOutcome::Failed { submit }.is_success());
    }

    #[test]
    fn test_submit_is_absent_before_form_interaction() {
        assert_eq!(LoginOutcome::AlreadyAuthenticated.submit(), None);
        assert_eq!(LoginOutcome::NotRequired.submit(), None);
    }

    #[test]
    fn test_submit_is_reported_after_form_interaction() {
        let outcome = LoginOutcome::Failed {
            submit: SubmitOutcome::ClickFailed {
                reason: "detached".to_string(),
            },
        };
        assert!(matches!(
            outcome.submit(),
            Some(SubmitOutcome::ClickFailed { .. })
        ));
    }

    #[test]
    fn test_run_outcome_success_follows_login_outcome() {
        assert!(RunOutcome::AlreadyOnline.is_success());
        assert!(!RunOutcome::ConnectFailed {
            ssid: "Example_WIFI".to_string()
        }
        .is_success());
        assert!(RunOutcome::Login(LoginOutcome::AlreadyAuthenticated).is_success());
        assert!(!RunOutcome::Login(LoginOutcome::Failed {
            submit: SubmitOutcome::NoControl
        })
        .is_success());
    }

    #[test]
    fn test_run_outcome_display_names_the_network() {
        let outcome = RunOutcome::ConnectFailed {
            ssid: "Example_WIFI".to_string(),
        };
        assert_eq!(outcome.to_string(), "could not connect to Example_WIFI");
    }

    #[test]
    fn test_submit_outcome_display_distinguishes_missing_and_failed() {
        let missing = SubmitOutcome::NoControl.to_string();
        let failed = SubmitOutcome::ClickFailed {
            reason: "boom".to_string(),
        }
        .to_string();
        assert_ne!(missing, failed);
        assert!(failed.contains("boom"));
    }
}
