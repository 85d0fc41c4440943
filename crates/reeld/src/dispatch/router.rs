//! Routing from command names to handlers.

use std::time::{SystemTime, UNIX_EPOCH};

use reel_protocol::{Command, Response};

/// Name the engine identifies itself by on the wire.
const ENGINE_NAME: &str = "reel-engine";

/// Command names understood by the engine, matched case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandKind {
    Health,
    Random,
    Shutdown,
    Unknown,
}

impl CommandKind {
    pub(crate) fn parse(value: &str) -> Self {
        match value {
            "health" => Self::Health,
            "random" => Self::Random,
            "shutdown" => Self::Shutdown,
            _ => Self::Unknown,
        }
    }
}

/// What the connection loop should do once the response is on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Disposition {
    /// Keep reading request lines from this connection.
    Continue,
    /// Terminate the whole process with success once the reply is flushed.
    Shutdown,
}

/// A routed command's reply plus its effect on the connection loop.
#[derive(Debug)]
pub(crate) struct Dispatched {
    pub(crate) response: Response,
    pub(crate) disposition: Disposition,
}

impl Dispatched {
    fn reply(response: Response) -> Self {
        Self {
            response,
            disposition: Disposition::Continue,
        }
    }
}

/// Maps one parsed command to exactly one response.
pub(crate) fn route(command: &Command) -> Dispatched {
    match CommandKind::parse(&command.cmd) {
        CommandKind::Health => Dispatched::reply(
            Response::ok(&command.id)
                .with_data(format!("{ENGINE_NAME} is healthy and running"))
                .with_log("Health check received"),
        ),
        CommandKind::Random => Dispatched::reply(
            Response::ok(&command.id)
                .with_data(format!("{ENGINE_NAME} Random ID: {}", unix_nanos()))
                .with_log("Random ID generated"),
        ),
        CommandKind::Shutdown => Dispatched {
            response: Response::ok(&command.id).with_log("Shutting down gracefully"),
            disposition: Disposition::Shutdown,
        },
        CommandKind::Unknown => Dispatched::reply(Response::error(
            &command.id,
            format!("Unknown command: {}", command.cmd),
        )),
    }
}

/// Response for a request line that failed JSON parsing.
///
/// The id stays empty because the malformed payload could not be read. Both
/// the plain dispatch path and the dev logger build this error here so the
/// two paths can never diverge.
pub(crate) fn invalid_json_response() -> Response {
    Response::error("", "Invalid JSON format")
}

/// Wall-clock nanoseconds since the Unix epoch.
///
/// This is the random identifier's only source of entropy; rapid calls on a
/// coarse-grained clock can collide. That matches the front end's current
/// expectations, so no counter is mixed in.
fn unix_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use reel_protocol::Status;
    use rstest::rstest;

    use super::*;

    fn command(id: &str, cmd: &str) -> Command {
        Command {
            id: id.to_owned(),
            cmd: cmd.to_owned(),
            ..Command::default()
        }
    }

    fn data_string(response: &Response) -> String {
        response
            .data
            .as_ref()
            .and_then(|value| value.as_str())
            .expect("data should be a string")
            .to_owned()
    }

    #[rstest]
    #[case("health")]
    #[case("random")]
    #[case("shutdown")]
    fn known_commands_succeed(#[case] name: &str) {
        let dispatched = route(&command("", name));
        assert_eq!(dispatched.response.status, Status::Ok);
    }

    #[rstest]
    #[case("HEALTH")]
    #[case("Health")]
    #[case(" health")]
    fn matching_is_case_sensitive_and_exact(#[case] name: &str) {
        let dispatched = route(&command("", name));
        assert_eq!(dispatched.response.status, Status::Error);
    }

    #[test]
    fn health_reports_the_engine_as_healthy() {
        let dispatched = route(&command("7", "health"));
        assert_eq!(dispatched.response.id, "7");
        assert_eq!(dispatched.disposition, Disposition::Continue);
        assert!(data_string(&dispatched.response).contains("healthy"));
        assert_eq!(
            dispatched.response.log.as_deref(),
            Some("Health check received")
        );
    }

    #[test]
    fn random_embeds_a_decimal_timestamp() {
        let dispatched = route(&command("", "random"));
        let data = data_string(&dispatched.response);
        let suffix = data
            .strip_prefix("reel-engine Random ID: ")
            .expect("fixed prefix");
        assert!(suffix.parse::<u128>().is_ok(), "not decimal: {suffix}");
    }

    #[test]
    fn random_differs_across_clock_ticks() {
        let first = data_string(&route(&command("", "random")).response);
        thread::sleep(Duration::from_millis(2));
        let second = data_string(&route(&command("", "random")).response);
        assert_ne!(first, second);
    }

    #[test]
    fn shutdown_requests_process_exit() {
        let dispatched = route(&command("9", "shutdown"));
        assert_eq!(dispatched.disposition, Disposition::Shutdown);
        assert_eq!(dispatched.response.id, "9");
        assert_eq!(
            dispatched.response.log.as_deref(),
            Some("Shutting down gracefully")
        );
        assert!(dispatched.response.data.is_none());
    }

    #[test]
    fn unknown_command_names_the_offender() {
        let dispatched = route(&command("", "foobar"));
        assert_eq!(dispatched.response.status, Status::Error);
        assert_eq!(
            dispatched.response.log.as_deref(),
            Some("Unknown command: foobar")
        );
    }

    #[test]
    fn missing_cmd_routes_as_unknown() {
        let dispatched = route(&command("1", ""));
        assert_eq!(dispatched.response.status, Status::Error);
        assert_eq!(dispatched.response.log.as_deref(), Some("Unknown command: "));
    }

    #[test]
    fn invalid_json_response_has_fixed_shape() {
        let response = invalid_json_response();
        assert_eq!(response.status, Status::Error);
        assert_eq!(response.id, "");
        assert_eq!(response.log.as_deref(), Some("Invalid JSON format"));
    }
}
