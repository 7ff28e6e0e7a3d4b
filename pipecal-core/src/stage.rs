//! Pipeline-stage colors and labels.
//!
//! Every event carries a stage slug; the views group and color events
//! by it. Known slugs come from a curated table. Unknown slugs fall
//! back to a deterministic hash of the slug string over a fixed
//! palette, so a custom stage keeps the same color across renders,
//! restarts, and builds. The hash never looks at the curated table, so
//! extending the table later cannot reshuffle colors already assigned
//! to fallback slugs.

use serde::{Deserialize, Serialize};

/// A pipeline stage as the recruiting service defines it.
/// Read-only to the engine: we only look up `name` and `slug`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStage {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub sort_order: i64,
}

/// Display styling for a stage: background/border as `#RRGGBB` hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageStyle {
    pub background: String,
    pub border: String,
    pub label: String,
}

/// Curated (slug, background, border, label) entries for the stages
/// the recruiting pipeline ships with.
const KNOWN_STAGES: &[(&str, &str, &str, &str)] = &[
    ("first-round", "#DBEAFE", "#3B82F6", "First Round"),
    ("face-to-face", "#FEF3C7", "#F59E0B", "Face to Face"),
    ("hr-round", "#FCE7F3", "#EC4899", "HR Round"),
    ("f2f1", "#EDE9FE", "#8B5CF6", "F2F 1"),
    ("shortlisted", "#D1FAE5", "#10B981", "Shortlisted"),
    ("technical-round", "#E0E7FF", "#6366F1", "Technical Round"),
    ("final-round", "#FFE4E6", "#F43F5E", "Final Round"),
    ("offer-sent", "#DCFCE7", "#22C55E", "Offer Sent"),
    ("archives", "#F3F4F6", "#9CA3AF", "Archives"),
];

/// Fallback (background, border) pairs for unknown slugs.
const FALLBACK_PALETTE: &[(&str, &str)] = &[
    ("#DBEAFE", "#3B82F6"),
    ("#FCE7F3", "#EC4899"),
    ("#D1FAE5", "#10B981"),
    ("#FEF3C7", "#F59E0B"),
    ("#EDE9FE", "#8B5CF6"),
    ("#E0E7FF", "#6366F1"),
    ("#FFE4E6", "#F43F5E"),
    ("#CFFAFE", "#06B6D4"),
    ("#DCFCE7", "#22C55E"),
    ("#FFEDD5", "#F97316"),
];

/// Resolve a stage slug to its display style.
///
/// Pure function of the slug string: the same input always yields the
/// same style.
pub fn resolve_stage(slug: &str) -> StageStyle {
    if let Some((_, background, border, label)) =
        KNOWN_STAGES.iter().find(|(known, ..)| *known == slug)
    {
        return StageStyle {
            background: (*background).to_string(),
            border: (*border).to_string(),
            label: (*label).to_string(),
        };
    }

    let index = fnv1a(slug) as usize % FALLBACK_PALETTE.len();
    let (background, border) = FALLBACK_PALETTE[index];
    StageStyle {
        background: background.to_string(),
        border: border.to_string(),
        label: humanize_slug(slug),
    }
}

/// 32-bit FNV-1a over the slug bytes.
fn fnv1a(input: &str) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;
    input
        .bytes()
        .fold(OFFSET_BASIS, |hash, byte| (hash ^ u32::from(byte)).wrapping_mul(PRIME))
}

/// `-`/`_` become spaces, each word is title-cased.
fn humanize_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep only the stages the calendar schedules interviews for: those
/// ordered after the "shortlisted" checkpoint, minus "archives".
/// Returned sorted by `sort_order`.
pub fn interview_stages(mut stages: Vec<PipelineStage>) -> Vec<PipelineStage> {
    stages.sort_by_key(|stage| stage.sort_order);
    let cutoff = stages
        .iter()
        .position(|stage| stage.slug == "shortlisted")
        .map(|index| index + 1)
        .unwrap_or(0);
    stages
        .into_iter()
        .skip(cutoff)
        .filter(|stage| stage.slug != "archives")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_slug_uses_curated_entry() {
        let style = resolve_stage("hr-round");
        assert_eq!(style.background, "#FCE7F3");
        assert_eq!(style.border, "#EC4899");
        assert_eq!(style.label, "HR Round");
    }

    #[test]
    fn unknown_slug_is_stable_across_calls() {
        let first = resolve_stage("custom-stage-x");
        let second = resolve_stage("custom-stage-x");
        assert_eq!(first, second);
        assert!(FALLBACK_PALETTE
            .iter()
            .any(|(background, _)| *background == first.background));
    }

    #[test]
    fn unknown_slug_label_is_title_cased() {
        assert_eq!(resolve_stage("system-design_review").label, "System Design Review");
        assert_eq!(resolve_stage("panel").label, "Panel");
    }

    #[test]
    fn fnv1a_matches_reference_vectors() {
        // Published FNV-1a 32-bit test vectors.
        assert_eq!(fnv1a(""), 0x811c_9dc5);
        assert_eq!(fnv1a("a"), 0xe40c_292c);
        assert_eq!(fnv1a("foobar"), 0xbf9c_f968);
    }

    fn stage(slug: &str, sort_order: i64) -> PipelineStage {
        PipelineStage {
            id: format!("stage-{slug}"),
            name: humanize_slug(slug),
            slug: slug.to_string(),
            sort_order,
        }
    }

    #[test]
    fn interview_stages_drop_pre_shortlist_and_archives() {
        let stages = vec![
            stage("archives", 99),
            stage("first-round", 1),
            stage("shortlisted", 2),
            stage("technical-round", 3),
            stage("offer-sent", 4),
        ];
        let kept: Vec<_> = interview_stages(stages)
            .into_iter()
            .map(|stage| stage.slug)
            .collect();
        assert_eq!(kept, vec!["technical-round", "offer-sent"]);
    }

    #[test]
    fn interview_stages_without_checkpoint_keep_everything_but_archives() {
        let stages = vec![stage("archives", 2), stage("panel", 1)];
        let kept: Vec<_> = interview_stages(stages)
            .into_iter()
            .map(|stage| stage.slug)
            .collect();
        assert_eq!(kept, vec!["panel"]);
    }
}
