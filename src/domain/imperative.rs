use super::clock_time::{DisplayString, RawTime};

/// Builds the `hh:mm:ss tt` reading step by step, mutating locals as it goes.
pub fn clock_time(time: RawTime) -> DisplayString {
    let mut hours = time.hours();
    let mut ampm = "AM";

    if hours == 12 {
        ampm = "PM";
    } else if hours > 12 {
        ampm = "PM";
        hours -= 12;
    }

    let mut hours_text = hours.to_string();
    let mut minutes = time.minutes().to_string();
    let mut seconds = time.seconds().to_string();

    if hours < 10 {
        hours_text = format!("0{hours_text}");
    }
    if time.minutes() < 10 {
        minutes = format!("0{minutes}");
    }
    if time.seconds() < 10 {
        seconds = format!("0{seconds}");
    }

    DisplayString::from(format!("{hours_text}:{minutes}:{seconds} {ampm}"))
}
