//! 端末向けの表示

use florascan_common::{DatasetView, IdentificationResult};
use std::fmt::Write;

/// データセットのステータス・プレビュー
pub fn render_dataset_view(view: &DatasetView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.status);

    for item in &view.items {
        if item.scientific_name.is_empty() {
            let _ = writeln!(out, "  - {}", item.name);
        } else {
            let _ = writeln!(out, "  - {} ({})", item.name, item.scientific_name);
        }
    }

    if let Some(more) = view.more_label() {
        let _ = writeln!(out, "  {}", more);
    }

    if view.show_clear {
        let _ = writeln!(out, "\n`florascan clear` でデータセットを削除");
    }

    out
}

/// 識別結果ページ
pub fn render_result(result: &IdentificationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🌿 {}", result.name);
    let _ = writeln!(out, "  Scientific name: {}", result.scientific_name);
    let _ = writeln!(out, "  Family:          {}", result.family);
    let _ = writeln!(out, "  Confidence:      {}", result.confidence);
    let _ = writeln!(out, "  Category:        {}", result.category);
    let _ = writeln!(out, "  Origin:          {}", result.origin);
    if !result.definition.is_empty() {
        let _ = writeln!(out, "  Definition:      {}", result.definition);
    }
    let _ = writeln!(out, "  Description:     {}", result.description);
    let _ = writeln!(out, "  Characteristics:");
    for c in &result.characteristics {
        let _ = writeln!(out, "    - {}", c);
    }
    if !result.care.is_empty() {
        let _ = writeln!(out, "  Care:            {}", result.care);
    }
    let _ = writeln!(out, "  Image:           {}", describe_image(&result.image));
    out
}

/// Data URLは中身を出さず種類とサイズだけ
fn describe_image(image: &str) -> String {
    if image.is_empty() {
        return "-".into();
    }
    match image.strip_prefix("data:").and_then(|rest| rest.split_once(',')) {
        Some((header, payload)) => {
            let mime = header.split(';').next().unwrap_or_default();
            format!("{} ({} base64 chars)", mime, payload.len())
        }
        None => image.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use florascan_common::{fallback_result, PlantRecord};

    #[test]
    fn test_render_empty_view() {
        let text = render_dataset_view(&DatasetView::build(None));
        assert_eq!(text, "No dataset loaded. Upload or paste above.\n");
    }

    #[test]
    fn test_render_truncated_view() {
        let plants: Vec<PlantRecord> = (0..22)
            .map(|i| PlantRecord { name: format!("P{}", i), ..Default::default() })
            .collect();
        let text = render_dataset_view(&DatasetView::build(Some(&plants)));
        assert!(text.starts_with("22 plant(s) in dataset."));
        assert!(text.contains("  - P19\n"));
        assert!(!text.contains("P20"));
        assert!(text.contains("… and 2 more"));
        assert!(text.contains("florascan clear"));
    }

    #[test]
    fn test_render_result_hides_data_url() {
        let result = fallback_result("", Some("data:image/png;base64,YWJj"));
        let text = render_result(&result);
        assert!(text.contains("🌿 Identified Plant"));
        assert!(text.contains("image/png (4 base64 chars)"));
        assert!(!text.contains("YWJj"));
        assert!(text.contains("    - Green foliage"));
    }

    #[test]
    fn test_describe_image() {
        assert_eq!(describe_image(""), "-");
        assert_eq!(describe_image("https://example.com/a.jpg"), "https://example.com/a.jpg");
        assert_eq!(describe_image("data:image/webp;base64,UklGR"), "image/webp (5 base64 chars)");
    }
}
