//! ## Printing Module
//!
//! This module is only here to make logging in the terminal easier to read.
//! It allows to print in appropriate colors depending on the situation, renders
//! the elevator events, and provides a status table of the dispatcher's view.
use crate::{config, world_view::{Dirn, ElevatorEvent, EventRx, UnitView, CallType}};
use ansi_term::Colour::{self, Green, Red, Yellow, Purple, Cyan};

use prettytable::{Table, row};
use unicode_width::UnicodeWidthStr;

/// Prints an error message in red to the terminal.
///
/// If `PRINT_ERR_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[ERROR\]:   {}", msg
///
/// ## Example
/// ```
/// use elevatorsim::print;
///
/// print::err("Something went wrong!".to_string());
/// ```
pub fn err(msg: String) {
    if config::flag(&config::PRINT_ERR_ON) {
        println!("{}{}\n", Red.paint("[ERROR]:   "), Red.paint(msg));
    }
}

/// Prints a warning message in yellow to the terminal.
///
/// If `PRINT_WARN_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[WARNING\]: {}", msg
pub fn warn(msg: String) {
    if config::flag(&config::PRINT_WARN_ON) {
        println!("{}{}\n", Yellow.paint("[WARNING]: "), Yellow.paint(msg));
    }
}

/// Prints a success message in green to the terminal.
///
/// If `PRINT_OK_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[OK\]:      {}", msg
pub fn ok(msg: String) {
    if config::flag(&config::PRINT_OK_ON) {
        println!("{}{}\n", Green.paint("[OK]:      "), Green.paint(msg));
    }
}

/// Prints an informational message in light blue to the terminal.
///
/// If `PRINT_INFO_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[INFO\]:    {}", msg
pub fn info(msg: String) {
    let light_blue = Colour::RGB(102, 178, 255);
    if config::flag(&config::PRINT_INFO_ON) {
        println!("{}{}\n", light_blue.paint("[INFO]:    "), light_blue.paint(msg));
    }
}

/// Prints an elevator-specific message in orange, tagged with the unit id.
///
/// If `PRINT_ELSE_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[ELEV {id}\]:  {}", msg
pub fn elevator(id: u8, msg: String) {
    let orange = Colour::RGB(255, 153, 51);
    if config::flag(&config::PRINT_ELSE_ON) {
        println!("{}{}", orange.paint(format!("[ELEV {}]:  ", id)), orange.paint(msg));
    }
}

/// Prints a dispatcher message in pink.
///
/// If `PRINT_ELSE_ON` is `false`, the message will not be printed.
pub fn dispatcher(msg: String) {
    let pink = Colour::RGB(255, 51, 255);
    if config::flag(&config::PRINT_ELSE_ON) {
        println!("{}{}", pink.paint("[DISPATCH]: "), pink.paint(msg));
    }
}

fn dirn_label(dirn: Dirn) -> &'static str {
    match dirn {
        Dirn::Up => "Up",
        Dirn::Down => "Down",
        Dirn::Idle => "Idle",
    }
}

fn button_label(call: CallType) -> &'static str {
    match call {
        CallType::HallUp => "Up",
        CallType::HallDown => "Down",
        CallType::Cab => "cabin",
    }
}

/// Human readable line for an event.
pub fn describe(event: &ElevatorEvent) -> String {
    match *event {
        ElevatorEvent::UnitCreated { unit, floor } => {
            format!("Elevator object with id={} created at floor {}.", unit, floor)
        }
        ElevatorEvent::ButtonPressed { unit, button } => match button.call {
            CallType::Cab => format!("Elevator {}: button {} pressed inside the cabin.", unit, button.floor),
            call => format!("Elevator {}: button {} on floor {} pressed.", unit, button_label(call), button.floor),
        },
        ElevatorEvent::CallDispatched { unit, floor, dirn, cost } => {
            format!("{} call on floor {} -> elevator {} (cost {}).", dirn_label(dirn), floor, unit, cost)
        }
        ElevatorEvent::MotionStarted { unit, floor, dirn } => {
            format!("Elevator {} started moving from floor {} ({}).", unit, floor, dirn_label(dirn))
        }
        ElevatorEvent::FloorArrived { unit, floor, dirn } => {
            format!("Elevator {} on floor {} ({}).", unit, floor, dirn_label(dirn))
        }
        ElevatorEvent::DoorsOpened { unit, floor, button, .. } => match button.call {
            CallType::Cab => format!("Elevator {}: doors opened on floor {} for a cabin call.", unit, floor),
            call => format!("Elevator {}: doors opened on floor {} for the {} call.", unit, floor, button_label(call)),
        },
        ElevatorEvent::DoorsClosed { unit, floor } => {
            format!("Elevator {}: doors closed on floor {}.", unit, floor)
        }
        ElevatorEvent::MotionStopped { unit, floor } => {
            format!("Elevator {} stopped moving on floor {}. No buttons pressed.", unit, floor)
        }
    }
}

/// Logs one event, as coloured text or as a JSON line when `PRINT_JSON_ON` is set.
pub fn event(event: &ElevatorEvent) {
    if config::flag(&config::PRINT_JSON_ON) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => err(format!("print::event(): failed to serialize event: {}", e)),
        }
        return;
    }

    match event {
        ElevatorEvent::CallDispatched { .. } => dispatcher(describe(event)),
        _ => elevator(event.unit(), describe(event)),
    }
}

/// The reporting task: logs every event until all senders are dropped.
pub async fn report_events(mut rx: EventRx) {
    while let Some(ev) = rx.recv().await {
        event(&ev);
    }
    info("Event channel closed, reporter stopping".to_string());
}

/// Pads the input text to a fixed display width using spaces.
///
/// Accounts for characters that may take more than one column width (e.g. arrows),
/// ensuring aligned text in terminal-based tables.
fn pad_text(text: &str, width: usize) -> String {
    let visible_width = UnicodeWidthStr::width(text);
    let padding = width.saturating_sub(visible_width);
    format!("{}{}", text, " ".repeat(padding))
}

fn dirn_cell(dirn: Dirn) -> String {
    match dirn {
        Dirn::Up => pad_text("⬆ Up", 8),
        Dirn::Down => pad_text("⬇ Down", 8),
        Dirn::Idle => pad_text("· Idle", 8),
    }
}

/// Logs the dispatcher's tracked view of every unit as a table.
///
/// If `PRINT_WV_ON` is false, the function exits early.
/// Printing frequency should be limited, see [config::STATUS_PRINT_PERIOD].
pub fn status_table(views: &[UnitView], num_floors: u8) {
    if !config::flag(&config::PRINT_WV_ON) {
        return;
    }

    println!("{}", Purple.bold().paint("┌────────────────────────────────┐"));
    println!("{}", Purple.bold().paint("│        ELEVATOR STATUS         │"));
    println!("{}", Purple.bold().paint("└────────────────────────────────┘"));

    let mut table = Table::new();
    table.add_row(row!["ID", "Floor", "Direction", "Shaft"]);
    for view in views {
        let shaft: String = (1..=num_floors)
            .map(|floor| if floor == view.floor { '█' } else { '·' })
            .collect();
        table.add_row(row![view.id, view.floor, dirn_cell(view.dirn), Cyan.paint(shaft).to_string()]);
    }
    table.printstd();
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_view::CallButton;

    #[test]
    fn pad_text_fills_to_width() {
        assert_eq!(pad_text("ab", 4), "ab  ");
        assert_eq!(pad_text("abcdef", 4), "abcdef");
    }

    #[test]
    fn describes_cabin_and_hall_presses() {
        let cab = ElevatorEvent::ButtonPressed { unit: 1, button: CallButton::cab(4) };
        assert_eq!(describe(&cab), "Elevator 1: button 4 pressed inside the cabin.");

        let hall = ElevatorEvent::ButtonPressed { unit: 0, button: CallButton { floor: 2, call: CallType::HallDown } };
        assert_eq!(describe(&hall), "Elevator 0: button Down on floor 2 pressed.");
    }

    #[test]
    fn door_opening_names_the_answered_arrow() {
        let opened = ElevatorEvent::DoorsOpened {
            unit: 1,
            floor: 2,
            dirn: Dirn::Down,
            button: CallButton { floor: 2, call: CallType::HallUp },
        };
        assert_eq!(describe(&opened), "Elevator 1: doors opened on floor 2 for the Up call.");

        let cab = ElevatorEvent::DoorsOpened { unit: 0, floor: 4, dirn: Dirn::Up, button: CallButton::cab(4) };
        assert_eq!(describe(&cab), "Elevator 0: doors opened on floor 4 for a cabin call.");
    }
}
