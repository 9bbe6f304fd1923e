use super::constants::{
    BODY_DELAY, BODY_PART_NAMES, BOX_SCALE_RATE, LID_PART_NAMES, VISIBILITY_THRESHOLD,
};
use super::cursor::Cursor;
use super::parts::{PartGroup, PartNodes, PartRole, ScaleTable};
use super::smoothing::damp;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxState {
    Closed,
    Opened,
}

#[derive(Clone, Debug)]
pub struct BoxConfig {
    pub lid_names: &'static [&'static str],
    pub body_names: &'static [&'static str],
    /// Approach rate of both progress values (per second).
    pub rate: f32,
    pub visibility_threshold: f32,
    /// `None` shrinks lid and body together.
    pub body_delay: Option<Duration>,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            lid_names: LID_PART_NAMES,
            body_names: BODY_PART_NAMES,
            rate: BOX_SCALE_RATE,
            visibility_threshold: VISIBILITY_THRESHOLD,
            body_delay: Some(BODY_DELAY),
        }
    }
}

/// A gift box that shrinks away once clicked.
///
/// Progress is 1 while closed and decays toward 0 after opening; each part is
/// drawn at `original_scale * progress` and culled near zero.
pub struct GiftBox {
    config: BoxConfig,
    state: BoxState,
    lid: PartGroup,
    body: PartGroup,
    original: Option<ScaleTable>,
    lid_progress: f32,
    body_progress: f32,
    // Starts counting on the first frame after the opening click
    since_open: Option<Duration>,
    on_open: Option<Box<dyn FnMut()>>,
}

impl GiftBox {
    pub fn new<N: PartNodes + ?Sized>(nodes: &N, config: BoxConfig) -> Self {
        let lid = PartGroup::resolve(PartRole::Lid, config.lid_names, nodes);
        let body = PartGroup::resolve(PartRole::Body, config.body_names, nodes);
        let gift = Self {
            config,
            state: BoxState::Closed,
            lid,
            body,
            original: None,
            lid_progress: 1.0,
            body_progress: 1.0,
            since_open: None,
            on_open: None,
        };
        log::info!(
            "[giftbox] lid parts={} body parts={}",
            gift.part_count(PartRole::Lid),
            gift.part_count(PartRole::Body)
        );
        gift
    }

    /// Register the callback fired when the box opens.
    pub fn with_on_open(mut self, on_open: impl FnMut() + 'static) -> Self {
        self.on_open = Some(Box::new(on_open));
        self
    }

    /// Returns `true` only for the click that opened the box.
    pub fn click(&mut self) -> bool {
        if self.state == BoxState::Opened {
            return false;
        }
        self.state = BoxState::Opened;
        self.since_open = None;
        log::info!("[giftbox] opened");
        if let Some(cb) = self.on_open.as_mut() {
            cb();
        }
        true
    }

    #[inline]
    pub fn hover(&self) -> Cursor {
        Cursor::Pointer
    }

    pub fn update<N: PartNodes + ?Sized>(&mut self, nodes: &mut N, dt: Duration) {
        if self.original.is_none() && !(self.lid.is_empty() && self.body.is_empty()) {
            self.original = Some(ScaleTable::capture(
                &*nodes,
                self.lid.ids().iter().chain(self.body.ids()),
            ));
        }

        let opened = self.state == BoxState::Opened;
        if opened {
            // The click's own frame also spans time from before the click
            self.since_open = Some(match self.since_open {
                Some(elapsed) => elapsed.saturating_add(dt),
                None => Duration::ZERO,
            });
        }
        let lid_target = if opened { 0.0 } else { 1.0 };
        let body_released = match (self.config.body_delay, self.since_open) {
            (None, _) => true,
            (Some(delay), Some(elapsed)) => elapsed >= delay,
            (Some(_), None) => false,
        };
        let body_target = if opened && body_released { 0.0 } else { 1.0 };

        let dt_sec = dt.as_secs_f32();
        self.lid_progress = damp(self.lid_progress, lid_target, self.config.rate, dt_sec);
        self.body_progress = damp(self.body_progress, body_target, self.config.rate, dt_sec);

        if let Some(original) = &self.original {
            let threshold = self.config.visibility_threshold;
            for group in [&self.lid, &self.body] {
                let progress = self.progress(group.role);
                for &id in group.ids() {
                    if let Some(scale) = original.get(id) {
                        nodes.set_scale(id, scale * progress);
                        nodes.set_visible(id, progress > threshold);
                    }
                }
            }
        }
    }

    #[inline]
    pub fn state(&self) -> BoxState {
        self.state
    }

    /// Current scale factor of a group, 1 when closed and decaying to 0.
    pub fn progress(&self, role: PartRole) -> f32 {
        match role {
            PartRole::Lid => self.lid_progress,
            PartRole::Body => self.body_progress,
        }
    }

    pub fn part_count(&self, role: PartRole) -> usize {
        match role {
            PartRole::Lid => self.lid.len(),
            PartRole::Body => self.body.len(),
        }
    }
}
