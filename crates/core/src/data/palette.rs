use eeg_cloud_protocol::{ChannelHue, ThemeToken};

/// Colour family for a channel name. Unknown channels are drawn neutral.
pub fn channel_hue(name: &str) -> ChannelHue {
    match name {
        "excitement" => ChannelHue::Excitement,
        "valence" => ChannelHue::Valence,
        "arousal" => ChannelHue::Arousal,
        "expectation" => ChannelHue::Expectation,
        _ => ChannelHue::Neutral,
    }
}

pub fn stroke_token(name: &str) -> ThemeToken {
    ThemeToken::ChannelStroke(channel_hue(name))
}

pub fn fill_token(name: &str) -> ThemeToken {
    ThemeToken::ChannelFill(channel_hue(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_channels() {
        assert_eq!(channel_hue("valence"), ChannelHue::Valence);
        assert_eq!(channel_hue("E"), ChannelHue::Neutral);
        assert_eq!(
            stroke_token("arousal"),
            ThemeToken::ChannelStroke(ChannelHue::Arousal)
        );
    }
}
