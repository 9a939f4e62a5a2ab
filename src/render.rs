/// Report renderer: maps a report (or its absence) to UI update instructions
use crate::config::PopupConfig;
use crate::report::Report;

/// One change to the popup's report area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// Replace the output text
    SetText(String),
    /// Replace the video title line
    SetTitle(String),
    /// Point the word cloud image at a new source
    SetImage(String),
    /// Remove every rendered tag chip
    ClearTags,
    /// Append one tag chip
    AddTag(String),
}

/// Build the updates for `report`
///
/// Rules:
/// 1. No report, or an empty one → the no-result message, title and tags cleared
/// 2. Otherwise → attitude + emoji, title, word cloud (or placeholder),
///    then tags cleared and re-added in order
///
/// Tags are always cleared before being added, so applying the same updates
/// twice leaves the same tag set.
pub fn render(report: Option<&Report>, config: &PopupConfig) -> Vec<UiUpdate> {
    let report = match report {
        Some(report) if !report.is_empty() => report,
        _ => return no_result(config),
    };

    let image = report
        .wcloud_data_uri()
        .unwrap_or_else(|| config.placeholder_image.clone());

    let mut updates = Vec::with_capacity(report.tags.len() + 4);
    updates.push(UiUpdate::SetText(report.headline()));
    updates.push(UiUpdate::SetTitle(report.video_title.clone().unwrap_or_default()));
    updates.push(UiUpdate::SetImage(image));
    updates.push(UiUpdate::ClearTags);
    updates.extend(report.tags.iter().cloned().map(UiUpdate::AddTag));
    updates
}

/// The fixed "nothing to show" updates
pub fn no_result(config: &PopupConfig) -> Vec<UiUpdate> {
    vec![
        UiUpdate::SetText(config.no_result_message.clone()),
        UiUpdate::SetTitle(String::new()),
        UiUpdate::ClearTags,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{ReportPanel, apply};
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    fn calm() -> Report {
        Report {
            attitude: "Calm".to_string(),
            emoji: "🙂".to_string(),
            wcloud: None,
            tags: vec!["music".to_string(), "nature".to_string()],
            video_title: None,
        }
    }

    fn tag_updates(updates: &[UiUpdate]) -> Vec<&str> {
        updates
            .iter()
            .filter_map(|u| match u {
                UiUpdate::AddTag(tag) => Some(tag.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_render_absent_report() {
        let config = PopupConfig::default();
        assert_eq!(
            render(None, &config),
            vec![
                UiUpdate::SetText(config.no_result_message.clone()),
                UiUpdate::SetTitle(String::new()),
                UiUpdate::ClearTags,
            ]
        );
    }

    #[test]
    fn test_render_empty_report() {
        let config = PopupConfig::default();
        assert_eq!(render(Some(&Report::default()), &config), no_result(&config));
    }

    #[test]
    fn test_render_full_report() {
        let config = PopupConfig::default();
        let updates = render(Some(&calm()), &config);

        assert_eq!(
            updates,
            vec![
                UiUpdate::SetText("Calm🙂".to_string()),
                UiUpdate::SetTitle(String::new()),
                UiUpdate::SetImage(config.placeholder_image.clone()),
                UiUpdate::ClearTags,
                UiUpdate::AddTag("music".to_string()),
                UiUpdate::AddTag("nature".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_attitude_without_tags() {
        let config = PopupConfig::default();
        let report = Report {
            attitude: "Happy".to_string(),
            ..Report::default()
        };

        let updates = render(Some(&report), &config);

        assert!(tag_updates(&updates).is_empty());
        assert_eq!(updates[0], UiUpdate::SetText("Happy".to_string()));
        assert!(!updates.contains(&UiUpdate::SetText(config.no_result_message.clone())));
    }

    #[test]
    fn test_render_word_cloud() {
        let config = PopupConfig::default();
        let report = Report {
            wcloud: Some(STANDARD.encode(b"\x89PNG\r\n\x1a\n0000")),
            video_title: Some("Forest sounds".to_string()),
            ..calm()
        };

        let updates = render(Some(&report), &config);

        assert_eq!(updates[1], UiUpdate::SetTitle("Forest sounds".to_string()));
        match &updates[2] {
            UiUpdate::SetImage(src) => assert!(src.starts_with("data:image/png;base64,")),
            other => panic!("expected image update, got {:?}", other),
        }
    }

    #[test]
    fn test_render_bad_word_cloud_uses_placeholder() {
        let config = PopupConfig::default();
        let report = Report {
            wcloud: Some("%%%".to_string()),
            ..calm()
        };

        let updates = render(Some(&report), &config);
        assert_eq!(updates[2], UiUpdate::SetImage(config.placeholder_image.clone()));
    }

    #[test]
    fn test_render_twice_is_idempotent() {
        let config = PopupConfig::default();
        let report = calm();
        let mut panel = ReportPanel::default();

        apply(&mut panel, &render(Some(&report), &config));
        apply(&mut panel, &render(Some(&report), &config));

        assert_eq!(panel.tags, vec!["music", "nature"]);
    }

    #[test]
    fn test_no_result_clears_previous_tags() {
        let config = PopupConfig::default();
        let mut panel = ReportPanel::default();

        apply(&mut panel, &render(Some(&calm()), &config));
        apply(&mut panel, &render(None, &config));

        assert_eq!(panel.text, config.no_result_message);
        assert!(panel.tags.is_empty());
    }

    #[test]
    fn test_no_result_clears_previous_title() {
        let config = PopupConfig::default();
        let titled = Report {
            video_title: Some("Forest sounds".to_string()),
            ..calm()
        };
        let mut panel = ReportPanel::default();

        apply(&mut panel, &render(Some(&titled), &config));
        assert_eq!(panel.title, "Forest sounds");

        apply(&mut panel, &render(None, &config));

        assert_eq!(panel.title, "");
        assert_eq!(panel.text, config.no_result_message);
    }

    #[test]
    fn test_title_only_report_renders_no_result() {
        let config = PopupConfig::default();
        let report = Report {
            video_title: Some("Forest sounds".to_string()),
            ..Report::default()
        };

        assert_eq!(render(Some(&report), &config), no_result(&config));
    }
}
