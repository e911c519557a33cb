/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::io::{self, Write};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::StatusFormat;
use crate::shared::{LiftError, LiftEvent, LiftStatus};

pub fn write_event<W: Write>(output: &mut W, event: &LiftEvent) -> io::Result<()> {
    writeln!(output, "{}", event)
}

pub fn write_error<W: Write>(output: &mut W, error: &LiftError) -> io::Result<()> {
    writeln!(output, "{}", error)
}

pub fn write_status<W: Write>(
    output: &mut W,
    status: &LiftStatus,
    format: StatusFormat,
) -> io::Result<()> {
    match format {
        StatusFormat::Text => write!(output, "{}", status_text(status)),
        StatusFormat::Json => writeln!(output, "{}", serde_json::to_string_pretty(status)?),
    }
}

pub fn status_text(status: &LiftStatus) -> String {
    let internal = status
        .internal_requests
        .iter()
        .map(|floor| floor.to_string())
        .collect::<Vec<String>>()
        .join(", ");
    let external = status
        .external_calls
        .iter()
        .map(|call| call.to_string())
        .collect::<Vec<String>>()
        .join(", ");

    format!(
        "\n--- STATUS ---\nFloor: {}\nDoors: {}\nDirection: {}\nInternal: {}\nExternal: {}\n--------------\n\n",
        status.floor,
        status.doors,
        status.direction,
        or_none(internal),
        or_none(external),
    )
}

fn or_none(list: String) -> String {
    if list.is_empty() {
        "None".to_string()
    } else {
        list
    }
}
