// filepath: src/widget/registry.rs
//! Widget construction
//!
//! Maps the configured widget kind to a built-in widget.

use log::info;

use crate::config::{ClockConfig, WidgetKind};
use crate::time::TimeSource;
use crate::widget::Widget;
use crate::widgets::{AnalogClock, TextClock};

/// Build the widget named in the configuration
pub fn build_widget(config: &ClockConfig, time: Box<dyn TimeSource>) -> Box<dyn Widget> {
    let widget: Box<dyn Widget> = match config.widget {
        WidgetKind::Analog => {
            let offset = config.offset_minutes();
            match (&config.offset, offset) {
                (Some(raw), None) => {
                    info!("Offset {:?} is not a whole number, using local time", raw)
                }
                (_, Some(minutes)) => info!("Using fixed offset of {} minutes from UTC", minutes),
                (None, None) => info!("No offset configured, using local time"),
            }
            Box::new(AnalogClock::new(
                config.face.clone(),
                config.hands.clone(),
                offset,
                time,
            ))
        }
        WidgetKind::Text => Box::new(TextClock::new(config.text.clone())),
    };
    info!("Built widget: {}", widget.name());
    widget
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::SystemClock;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_the_configured_kind() {
        let analog = build_widget(&ClockConfig::default(), Box::new(SystemClock));
        assert_eq!(analog.id(), "analog");
        assert!(analog.animates());

        let config = ClockConfig {
            widget: WidgetKind::Text,
            ..ClockConfig::default()
        };
        let text = build_widget(&config, Box::new(SystemClock));
        assert_eq!(text.id(), "text");
        assert!(!text.animates());
    }
}
