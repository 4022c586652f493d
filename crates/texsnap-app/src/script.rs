//! Pointer-event scripts
//!
//! One event per line: `down X Y`, `move X Y` or `up X Y`. Blank lines and
//! `#` comments are skipped.

use anyhow::{Context, bail};
use texsnap_types::PointerEvent;

pub fn parse_script(text: &str) -> anyhow::Result<Vec<PointerEvent>> {
    let mut events = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let event = parse_line(line).with_context(|| format!("line {}: {:?}", index + 1, line))?;
        events.push(event);
    }

    Ok(events)
}

fn parse_line(line: &str) -> anyhow::Result<PointerEvent> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let [kind, x, y] = parts.as_slice() else {
        bail!("expected `<down|move|up> X Y`");
    };

    let x: i32 = x.parse().with_context(|| format!("bad x coordinate {:?}", x))?;
    let y: i32 = y.parse().with_context(|| format!("bad y coordinate {:?}", y))?;

    match kind.to_ascii_lowercase().as_str() {
        "down" => Ok(PointerEvent::down(x, y)),
        "move" => Ok(PointerEvent::moved(x, y)),
        "up" => Ok(PointerEvent::up(x, y)),
        other => bail!("unknown pointer event {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = "\
# select the integral
down 50 50
move 30 40   # halfway
move 10 10

up 10 10
";
        let events = parse_script(script).unwrap();
        assert_eq!(
            events,
            vec![
                PointerEvent::down(50, 50),
                PointerEvent::moved(30, 40),
                PointerEvent::moved(10, 10),
                PointerEvent::up(10, 10),
            ]
        );
    }

    #[test]
    fn test_negative_and_uppercase() {
        let events = parse_script("DOWN -5 12").unwrap();
        assert_eq!(events, vec![PointerEvent::down(-5, 12)]);
    }

    #[test]
    fn test_errors_name_the_line() {
        let err = parse_script("down 1 1\nclick 2 2").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));

        let err = parse_script("move 1").unwrap_err();
        assert!(format!("{:#}", err).contains("expected"));

        let err = parse_script("up x 3").unwrap_err();
        assert!(format!("{:#}", err).contains("bad x coordinate"));
    }
}
