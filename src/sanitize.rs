//! The sanitizer: one set of passes, run either to report or to fix.

use kurbo::Rect;
use log::{debug, info};

use crate::closure::{SplitRefused, close_fill_shape, split_stroke_and_fill};
use crate::classify::{PathClass, classify};
use crate::confirm::{Decision, Policy, Prompt};
use crate::document::{Document, ItemId, ItemKind};
use crate::membership::is_within_compound_path;
use crate::report::{Issue, Report, Unresolved, UnresolvedItem};
use crate::scene::Scene;
use crate::settings::{ColorMode, RasterColorModel};

/// Raster effects resolution expected for print, in ppi.
pub const PRINT_RESOLUTION: f64 = 350.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Count findings. Nothing is changed and nobody is asked.
    #[default]
    Report,
    Fix,
}

/// Which passes run, and how the result is written.
#[derive(Debug, Clone)]
pub struct Options {
    pub mode: Mode,
    /// Color mode and raster effects settings
    pub check_document_settings: bool,
    /// Locked, empty and hidden layers
    pub handle_layers: bool,
    /// Locked and hidden objects
    pub handle_hidden_items: bool,
    /// Paths with neither fill nor stroke
    pub remove_colorless: bool,
    /// Stray points and filled open paths
    pub handle_paths: bool,
    /// Count text, graphs and images
    pub count_foreign_items: bool,
    /// Artboard count and objects off the artboard
    pub check_artboards: bool,
    /// Target raster effects resolution in ppi
    pub raster_resolution: f64,
    /// Decimal places for rewritten path data (shortest round-trip if unset)
    pub precision: Option<u8>,
    /// Indent the output
    pub pretty: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: Mode::Report,
            check_document_settings: true,
            handle_layers: true,
            handle_hidden_items: true,
            remove_colorless: true,
            handle_paths: true,
            count_foreign_items: true,
            check_artboards: true,
            raster_resolution: PRINT_RESOLUTION,
            precision: None,
            pretty: true,
        }
    }
}

impl Options {
    /// Layers, hidden objects, stray points and filled open paths only.
    pub fn paths_only(mode: Mode) -> Self {
        Self {
            mode,
            check_document_settings: false,
            remove_colorless: false,
            count_foreign_items: false,
            check_artboards: false,
            ..Self::default()
        }
    }
}

/// Run every enabled pass over `doc`.
pub fn sanitize(doc: &mut Document, options: &Options, prompt: &mut dyn Prompt) -> Report {
    let mut run = Run {
        doc,
        options,
        ledger: Ledger::new(options.mode, prompt),
        keep_hidden: Vec::new(),
    };

    if options.check_document_settings {
        run.document_settings();
    }
    if options.handle_layers {
        run.layers();
    }
    if options.handle_hidden_items {
        run.items();
    }
    if options.handle_paths {
        path_pass(&mut *run.doc, options, &mut run.ledger);
    }
    if options.count_foreign_items {
        run.foreign_items();
    }
    if options.check_artboards {
        run.artboards();
    }
    run.finish()
}

/// Run only the path pass, over any [`Scene`].
pub fn close_filled_paths<S: Scene + ?Sized>(
    scene: &mut S,
    options: &Options,
    prompt: &mut dyn Prompt,
) -> Report {
    let mut ledger = Ledger::new(options.mode, prompt);
    path_pass(scene, options, &mut ledger);
    ledger.report
}

/// Decision state and findings shared by all passes.
struct Ledger<'p> {
    policy: Policy<'p>,
    report: Report,
}

impl<'p> Ledger<'p> {
    fn new(mode: Mode, prompt: &'p mut dyn Prompt) -> Self {
        Self {
            policy: Policy::new(prompt),
            report: Report::new(mode),
        }
    }

    fn fixing(&self) -> bool {
        self.report.mode == Mode::Fix
    }

    /// Ask whether a finding may be fixed. A refusal is recorded as
    /// unresolved. In report mode nothing is asked and nothing may be fixed.
    fn settle<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        item: Option<ItemId>,
        decision: Decision,
        issue: Issue,
        message: &str,
    ) -> bool {
        if !self.fixing() {
            return false;
        }
        if let Some(id) = item
            && self.policy.should_ask(decision)
        {
            scene.select(Some(id));
        }
        let verdict = self.policy.confirm(decision, message);
        debug!("{} -> {:?}", message, verdict);
        match Unresolved::from_verdict(verdict) {
            None => true,
            Some(reason) => {
                let description = item.map_or_else(|| issue.to_string(), |id| scene.describe(id));
                self.unresolved(item, description, issue, reason);
                false
            }
        }
    }

    fn unresolved(&mut self, item: Option<ItemId>, description: String, issue: Issue, reason: Unresolved) {
        self.report.unresolved.push(UnresolvedItem {
            item,
            description,
            issue,
            reason,
        });
    }
}

/// Colorless paths, stray points and filled open paths.
///
/// Paths are visited back to front over a snapshot taken up front; copies
/// made while splitting are not in the snapshot and are never revisited.
/// A colorless path that is kept goes on to the remaining checks.
fn path_pass<S: Scene + ?Sized>(scene: &mut S, options: &Options, ledger: &mut Ledger<'_>) {
    let snapshot = scene.paths();
    debug!("Checking {} paths", snapshot.len());

    for id in snapshot {
        let Some(path) = scene.path(id) else {
            continue;
        };
        let class = classify(path);
        let colorless = path.is_colorless();
        let stroked = path.is_stroked();

        if colorless && options.remove_colorless {
            ledger.report.colorless_paths += 1;
            let message = format!(
                "{} has neither fill nor stroke. Delete it?",
                scene.describe(id)
            );
            if ledger.settle(scene, Some(id), Decision::ColorlessPath, Issue::ColorlessPath, &message) {
                scene.remove(id);
                ledger.report.removed_items += 1;
                continue;
            }
        }

        match class {
            PathClass::StrayPoint => {
                ledger.report.stray_points += 1;
                let message = format!("{} is a stray point. Delete it?", scene.describe(id));
                if ledger.settle(scene, Some(id), Decision::StrayPoint, Issue::StrayPoint, &message) {
                    scene.remove(id);
                    ledger.report.removed_items += 1;
                }
            }
            PathClass::FilledLine => {
                ledger.report.filled_lines += 1;
                fix_filled_line(scene, ledger, id, stroked);
            }
            PathClass::FilledOnlyOpen => {
                ledger.report.filled_open_paths += 1;
                if ledger.fixing()
                    && let Some(path) = scene.path_mut(id)
                {
                    close_fill_shape(path);
                    ledger.report.closed_paths += 1;
                    debug!("Closed {}", scene.describe(id));
                }
            }
            PathClass::FilledStrokedOpen => {
                ledger.report.filled_open_paths += 1;
                if ledger.fixing() {
                    split(scene, ledger, id);
                }
            }
            PathClass::Irrelevant => {}
        }
    }

    scene.select(None);
}

/// A filled path that encloses no area: drop the fill when there is a stroke
/// to keep, otherwise the path draws nothing useful and goes.
fn fix_filled_line<S: Scene + ?Sized>(scene: &mut S, ledger: &mut Ledger<'_>, id: ItemId, stroked: bool) {
    let description = scene.describe(id);
    if stroked && ledger.fixing() && is_within_compound_path(scene, id) {
        // Members share the compound path's paint
        leave_in_compound(
            scene,
            ledger,
            id,
            Issue::FilledLine,
            "a straight path with a fill and a stroke",
        );
    } else if stroked {
        let message = format!("{} is a straight path with a fill. Remove the fill?", description);
        if ledger.settle(scene, Some(id), Decision::FilledLine, Issue::FilledLine, &message)
            && let Some(path) = scene.path_mut(id)
        {
            path.fill = None;
            ledger.report.fills_removed += 1;
        }
    } else {
        let message = format!(
            "{} is a hairline path with a fill and no stroke. Delete it?",
            description
        );
        if ledger.settle(scene, Some(id), Decision::FilledLine, Issue::FilledLine, &message) {
            scene.remove(id);
            ledger.report.removed_items += 1;
        }
    }
}

fn split<S: Scene + ?Sized>(scene: &mut S, ledger: &mut Ledger<'_>, id: ItemId) {
    match split_stroke_and_fill(scene, id) {
        Ok(copy) => {
            debug!("Split {} into fill and stroke {}", scene.describe(id), copy);
            ledger.report.split_paths += 1;
        }
        Err(SplitRefused::InsideCompoundPath) => {
            leave_in_compound(
                scene,
                ledger,
                id,
                Issue::FilledOpenPath,
                "a filled open path with a stroke",
            );
        }
        Err(SplitRefused::NotAPath) => {}
    }
}

/// Select a compound path member that cannot be fixed, tell the user and
/// record it as unresolved.
fn leave_in_compound<S: Scene + ?Sized>(
    scene: &mut S,
    ledger: &mut Ledger<'_>,
    id: ItemId,
    issue: Issue,
    what: &str,
) {
    let description = scene.describe(id);
    scene.select(Some(id));
    ledger.policy.notify(&format!(
        "{} is {} inside a compound path. \
         It cannot be fixed automatically; please fix it by hand.",
        description, what
    ));
    ledger.unresolved(Some(id), description, issue, Unresolved::UnsupportedGeometry);
}

struct Run<'a, 'p> {
    doc: &'a mut Document,
    options: &'a Options,
    ledger: Ledger<'p>,
    /// Hidden layers and objects the user chose to keep.
    keep_hidden: Vec<ItemId>,
}

impl Run<'_, '_> {
    fn fixing(&self) -> bool {
        self.ledger.fixing()
    }

    fn document_settings(&mut self) {
        let settings = self.doc.settings;
        if settings.color_mode != ColorMode::Cmyk {
            info!("Document color mode is {}, expected cmyk", settings.color_mode);
            self.ledger.report.color_mode = Some(settings.color_mode);
        }

        if settings.raster_color_model != RasterColorModel::Grayscale {
            self.ledger.report.raster_color_model = Some(settings.raster_color_model);
            let message = format!(
                "Raster effects use the {} color model. Switch to grayscale?",
                settings.raster_color_model
            );
            if self.ledger.settle(
                &mut *self.doc,
                None,
                Decision::RasterColorModel,
                Issue::RasterColorModel,
                &message,
            ) {
                self.doc.settings.raster_color_model = RasterColorModel::Grayscale;
                self.ledger.report.settings_fixed += 1;
            }
        }

        let target = self.options.raster_resolution;
        if settings.raster_resolution != target {
            self.ledger.report.raster_resolution = Some(settings.raster_resolution);
            let message = format!(
                "Raster effects resolution is {} ppi. Change it to {} ppi?",
                settings.raster_resolution, target
            );
            if self.ledger.settle(
                &mut *self.doc,
                None,
                Decision::RasterResolution,
                Issue::RasterResolution,
                &message,
            ) {
                self.doc.settings.raster_resolution = target;
                self.ledger.report.settings_fixed += 1;
            }
        }
    }

    /// Layers and sub-layers, depth first and back to front.
    fn layers(&mut self) {
        let mut stack: Vec<ItemId> = self.doc.layers().into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            let Some(layer) = self.doc.get(id) else {
                continue;
            };
            let (locked, hidden, empty) = (layer.locked, layer.hidden, layer.children().is_empty());
            let description = self.doc.describe(id);

            if locked {
                self.ledger.report.locked_layers += 1;
                if self.fixing() {
                    self.set_locked(id, false);
                }
            }

            if empty {
                self.ledger.report.empty_layers += 1;
                if self.fixing() {
                    debug!("Deleting empty {}", description);
                    self.doc.remove(id);
                    self.ledger.report.removed_items += 1;
                }
                continue;
            }

            if hidden {
                self.ledger.report.hidden_layers += 1;
                if self.fixing() {
                    self.set_hidden(id, false);
                    let message = format!("{} is hidden. Delete it with everything on it?", description);
                    if self.ledger.settle(
                        &mut *self.doc,
                        Some(id),
                        Decision::HiddenLayer,
                        Issue::HiddenLayer,
                        &message,
                    ) {
                        self.doc.remove(id);
                        self.ledger.report.removed_items += 1;
                        continue;
                    }
                    self.keep_hidden.push(id);
                }
            }

            stack.extend(self.doc.sublayers(id).into_iter().rev());
        }
        self.doc.select(None);
    }

    /// Unlock every object; offer to delete hidden ones.
    fn items(&mut self) {
        for id in self.doc.walk() {
            let Some(item) = self.doc.get(id) else {
                continue;
            };
            if item.kind.is_layer() || matches!(item.kind, ItemKind::Opaque(_)) {
                continue;
            }
            let (locked, hidden) = (item.locked, item.hidden);

            if locked {
                self.ledger.report.locked_items += 1;
                if self.fixing() {
                    self.set_locked(id, false);
                }
            }

            if hidden {
                self.ledger.report.hidden_items += 1;
                if self.fixing() {
                    self.set_hidden(id, false);
                    let message = format!("{} is hidden. Delete it?", self.doc.describe(id));
                    if self.ledger.settle(
                        &mut *self.doc,
                        Some(id),
                        Decision::HiddenItem,
                        Issue::HiddenItem,
                        &message,
                    ) {
                        self.doc.remove(id);
                        self.ledger.report.removed_items += 1;
                    } else {
                        self.keep_hidden.push(id);
                    }
                }
            }
        }
        self.doc.select(None);
    }

    fn foreign_items(&mut self) {
        let report = &mut self.ledger.report;
        for id in self.doc.walk() {
            match self.doc.get(id).map(|item| &item.kind) {
                Some(ItemKind::Text) => report.text_frames += 1,
                Some(ItemKind::Graph) => report.graphs += 1,
                Some(ItemKind::Raster) => report.raster_images += 1,
                Some(ItemKind::Placed) => report.placed_items += 1,
                _ => {}
            }
        }
        info!(
            "{} text frames, {} graphs, {} raster images, {} placed images",
            report.text_frames, report.graphs, report.raster_images, report.placed_items
        );
    }

    /// With a single artboard, offer to delete page items that do not touch
    /// it. Several artboards are only reported.
    fn artboards(&mut self) {
        self.ledger.report.artboards = self.doc.artboards.len();
        let artboard = match self.doc.artboards.as_slice() {
            [] => {
                debug!("Document has no artboard");
                return;
            }
            [artboard] => *artboard,
            many => {
                info!("Document has {} artboards, expected one", many.len());
                return;
            }
        };

        for id in self.page_items() {
            let Some(bounds) = self.doc.world_bounds(id) else {
                continue;
            };
            if touches(bounds, artboard) {
                continue;
            }
            self.ledger.report.off_artboard_items += 1;
            let message = format!(
                "{} lies entirely outside the artboard. Delete it?",
                self.doc.describe(id)
            );
            if self.ledger.settle(
                &mut *self.doc,
                Some(id),
                Decision::OffArtboardItem,
                Issue::OffArtboardItem,
                &message,
            ) {
                self.doc.remove(id);
                self.ledger.report.removed_items += 1;
            }
        }
        self.doc.select(None);
    }

    /// Items placed directly on a layer or sub-layer.
    fn page_items(&self) -> Vec<ItemId> {
        self.doc
            .walk()
            .into_iter()
            .filter(|&id| {
                self.doc.get(id).is_some_and(|item| {
                    !item.kind.is_layer()
                        && !matches!(item.kind, ItemKind::Opaque(_))
                        && item
                            .parent()
                            .and_then(|parent| self.doc.get(parent))
                            .is_some_and(|parent| parent.kind.is_layer())
                })
            })
            .collect()
    }

    fn set_hidden(&mut self, id: ItemId, hidden: bool) {
        if let Some(item) = self.doc.get_mut(id) {
            item.hidden = hidden;
        }
    }

    fn set_locked(&mut self, id: ItemId, locked: bool) {
        if let Some(item) = self.doc.get_mut(id) {
            item.locked = locked;
        }
    }

    fn finish(mut self) -> Report {
        for id in std::mem::take(&mut self.keep_hidden) {
            self.set_hidden(id, true);
        }
        self.doc.select(None);

        let report = self.ledger.report;
        info!("{} problems left", report.outstanding());
        report
    }
}

fn touches(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}
