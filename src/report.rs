//! Findings and outcomes of a sanitizer run.

use std::fmt;

use crate::confirm::Verdict;
use crate::document::ItemId;
use crate::sanitize::Mode;
use crate::settings::{ColorMode, RasterColorModel};

/// Why a finding was left in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    /// The fix is not possible for this geometry.
    UnsupportedGeometry,
    UserDeclined,
    PromptDismissed,
}

impl Unresolved {
    /// The reason a confirmation left its finding in place, if it did.
    pub fn from_verdict(verdict: Verdict) -> Option<Self> {
        match verdict {
            Verdict::Accepted => None,
            Verdict::Declined => Some(Unresolved::UserDeclined),
            Verdict::Dismissed => Some(Unresolved::PromptDismissed),
        }
    }
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unresolved::UnsupportedGeometry => "cannot be fixed automatically",
            Unresolved::UserDeclined => "declined",
            Unresolved::PromptDismissed => "prompt dismissed",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Issue {
    RasterColorModel,
    RasterResolution,
    HiddenLayer,
    HiddenItem,
    ColorlessPath,
    StrayPoint,
    FilledLine,
    FilledOpenPath,
    OffArtboardItem,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Issue::RasterColorModel => "raster effects color model",
            Issue::RasterResolution => "raster effects resolution",
            Issue::HiddenLayer => "hidden layer",
            Issue::HiddenItem => "hidden object",
            Issue::ColorlessPath => "path without fill or stroke",
            Issue::StrayPoint => "stray point",
            Issue::FilledLine => "filled straight path",
            Issue::FilledOpenPath => "filled open path",
            Issue::OffArtboardItem => "object outside the artboard",
        })
    }
}

/// A finding that is still in the document after a fix run.
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedItem {
    /// `None` for document-wide settings.
    pub item: Option<ItemId>,
    pub description: String,
    pub issue: Issue,
    pub reason: Unresolved,
}

/// Counts of what a run found and did.
///
/// Finding counters count what was found in either mode; in fix mode the
/// fix counters say what was done about it and `unresolved` lists what is
/// left.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub mode: Mode,

    /// Document color mode, when it is not CMYK.
    pub color_mode: Option<ColorMode>,
    /// Raster effects color model, when it is not grayscale.
    pub raster_color_model: Option<RasterColorModel>,
    /// Raster effects resolution, when it is not the target.
    pub raster_resolution: Option<f64>,
    pub settings_fixed: usize,

    pub locked_layers: usize,
    pub locked_items: usize,
    pub empty_layers: usize,
    pub hidden_layers: usize,
    pub hidden_items: usize,
    pub colorless_paths: usize,
    pub stray_points: usize,
    pub filled_lines: usize,
    pub filled_open_paths: usize,

    pub closed_paths: usize,
    pub split_paths: usize,
    pub fills_removed: usize,
    pub removed_items: usize,

    pub text_frames: usize,
    pub graphs: usize,
    pub raster_images: usize,
    pub placed_items: usize,

    pub artboards: usize,
    pub off_artboard_items: usize,

    pub unresolved: Vec<UnresolvedItem>,
}

impl Report {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Filled open paths, straight or not, that are still filled and open.
    pub fn unresolved_filled_open_paths(&self) -> usize {
        self.count_unresolved(|issue| matches!(issue, Issue::FilledLine | Issue::FilledOpenPath))
    }

    pub fn unresolved_stray_points(&self) -> usize {
        self.count_unresolved(|issue| issue == Issue::StrayPoint)
    }

    fn count_unresolved(&self, matches: impl Fn(Issue) -> bool) -> usize {
        self.unresolved
            .iter()
            .filter(|entry| matches(entry.issue))
            .count()
    }

    /// Problems left in the document: every finding in report mode, the
    /// unresolved ones and the unfixable settings in fix mode.
    pub fn outstanding(&self) -> usize {
        let unfixable =
            usize::from(self.color_mode.is_some()) + usize::from(self.artboards > 1);
        match self.mode {
            Mode::Report => {
                unfixable
                    + usize::from(self.raster_color_model.is_some())
                    + usize::from(self.raster_resolution.is_some())
                    + self.locked_layers
                    + self.locked_items
                    + self.empty_layers
                    + self.hidden_layers
                    + self.hidden_items
                    + self.colorless_paths
                    + self.stray_points
                    + self.filled_lines
                    + self.filled_open_paths
                    + self.off_artboard_items
            }
            Mode::Fix => unfixable + self.unresolved.len(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.outstanding() == 0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fix = self.mode == Mode::Fix;

        if let Some(mode) = self.color_mode {
            writeln!(f, "Document color mode is {}, not cmyk", mode)?;
        }
        if let Some(model) = self.raster_color_model {
            writeln!(f, "Raster effects color model was {}", model)?;
        }
        if let Some(ppi) = self.raster_resolution {
            writeln!(f, "Raster effects resolution was {} ppi", ppi)?;
        }
        if self.artboards > 1 {
            writeln!(f, "Document has {} artboards", self.artboards)?;
        }

        let findings = [
            (self.locked_layers, "locked layers"),
            (self.locked_items, "locked objects"),
            (self.empty_layers, "empty layers"),
            (self.hidden_layers, "hidden layers"),
            (self.hidden_items, "hidden objects"),
            (self.colorless_paths, "paths without fill or stroke"),
            (self.stray_points, "stray points"),
            (self.filled_lines, "filled straight paths"),
            (self.filled_open_paths, "filled open paths"),
            (self.off_artboard_items, "objects outside the artboard"),
        ];
        for (count, what) in findings {
            if count > 0 {
                writeln!(f, "Found {} {}", count, what)?;
            }
        }

        if fix {
            let actions = [
                (self.settings_fixed, "settings corrected"),
                (self.closed_paths, "paths closed"),
                (self.split_paths, "paths split into fill and stroke"),
                (self.fills_removed, "fills removed"),
                (self.removed_items, "items deleted"),
            ];
            for (count, what) in actions {
                if count > 0 {
                    writeln!(f, "{} {}", count, what)?;
                }
            }
        }

        let foreign = [
            (self.text_frames, "text frames"),
            (self.graphs, "graphs"),
            (self.raster_images, "raster images"),
            (self.placed_items, "placed images"),
        ];
        for (count, what) in foreign {
            if count > 0 {
                writeln!(f, "Contains {} {}", count, what)?;
            }
        }

        for entry in &self.unresolved {
            writeln!(
                f,
                "Unresolved {} {}: {}",
                entry.issue, entry.description, entry.reason
            )?;
        }

        if self.is_clean() {
            writeln!(f, "No problems left")?;
        } else if fix {
            writeln!(f, "{} problems left", self.outstanding())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_mode_counts_findings() {
        let mut report = Report::new(Mode::Report);
        assert!(report.is_clean());
        report.stray_points = 2;
        report.text_frames = 4;
        assert_eq!(report.outstanding(), 2);
        let text = report.to_string();
        assert!(text.contains("Found 2 stray points"));
        assert!(text.contains("Contains 4 text frames"));
    }

    #[test]
    fn test_fix_mode_counts_what_is_left() {
        let mut report = Report::new(Mode::Fix);
        report.filled_open_paths = 3;
        report.closed_paths = 2;
        assert!(report.is_clean());

        report.unresolved.push(UnresolvedItem {
            item: None,
            description: "path \"a\"".into(),
            issue: Issue::FilledOpenPath,
            reason: Unresolved::UnsupportedGeometry,
        });
        report.unresolved.push(UnresolvedItem {
            item: None,
            description: "path \"b\"".into(),
            issue: Issue::StrayPoint,
            reason: Unresolved::UserDeclined,
        });
        assert_eq!(report.unresolved_filled_open_paths(), 1);
        assert_eq!(report.unresolved_stray_points(), 1);
        assert_eq!(report.outstanding(), 2);
        assert!(report.to_string().contains(
            "Unresolved filled open path path \"a\": cannot be fixed automatically"
        ));
    }

    #[test]
    fn test_color_mode_is_never_fixed() {
        let mut report = Report::new(Mode::Fix);
        report.color_mode = Some(ColorMode::Rgb);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_unresolved_from_verdict() {
        assert_eq!(Unresolved::from_verdict(Verdict::Accepted), None);
        assert_eq!(
            Unresolved::from_verdict(Verdict::Dismissed),
            Some(Unresolved::PromptDismissed)
        );
    }
}
