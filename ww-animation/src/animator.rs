//! This module contains [`SceneAnimator`], which turns gestures and elapsed time into
//! [`SceneFrame`]s.

use crate::{
    config::SceneConfig,
    control::ControlState,
    decor::{sleigh_transform, star_transform, DustField},
    population::Population,
    reveal::{RevealLatch, RevealListener},
};
use glam::{Quat, Vec3};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fmt;
use tracing::{debug, info, instrument};
use ww_frame::{CameraPose, InstanceTransform, SceneFrame, Viewport};
use ww_gesture::GestureDescriptor;

/// Owns all the state of the scene and advances it once per rendered frame.
pub struct SceneAnimator {
    config: SceneConfig,
    control: ControlState,
    reveal: RevealLatch,
    listener: Option<Box<dyn RevealListener>>,
    populations: Vec<Population>,
    dust: DustField,
    viewport: Viewport,

    /// Seconds since the first tick.
    time: f32,

    /// The accumulated rotation of the tree group about Y.
    tree_rotation: f32,
}

impl fmt::Debug for SceneAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneAnimator")
            .field("control", &self.control)
            .field("revealed", &self.reveal.revealed())
            .field("populations", &self.populations.len())
            .field("viewport", &self.viewport)
            .field("time", &self.time)
            .field("tree_rotation", &self.tree_rotation)
            .finish_non_exhaustive()
    }
}

impl SceneAnimator {
    /// Build the scene with fresh random scatter positions.
    pub fn new(config: SceneConfig) -> Self {
        Self::with_rng(config, &mut StdRng::from_entropy())
    }

    /// Build the scene, taking the scatter positions and dust from `rng`.
    #[instrument(skip_all)]
    pub fn with_rng<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Self {
        let populations: Vec<Population> = config
            .tree
            .populations
            .iter()
            .map(|population| Population::new(population, rng))
            .collect();
        let dust = DustField::new(&config.dust, rng);

        info!(
            populations = populations.len(),
            instances = populations.iter().map(|p| p.layout().len()).sum::<usize>(),
            dust = dust.positions().len(),
            "Built scene"
        );

        Self {
            control: ControlState::new(&config.control),
            reveal: RevealLatch::from_config(&config.reveal),
            listener: None,
            populations,
            dust,
            viewport: Viewport::default(),
            time: 0.,
            tree_rotation: 0.,
            config,
        }
    }

    /// Register the listener for changes of the reveal mode, replacing any previous one.
    pub fn set_reveal_listener(&mut self, listener: impl RevealListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Set the size of the surface being rendered to. The next frame uses the new aspect ratio.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        debug!(?viewport, "Viewport resized");
        self.viewport = viewport;
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[inline]
    pub fn control(&self) -> &ControlState {
        &self.control
    }

    #[inline]
    pub fn populations(&self) -> &[Population] {
        &self.populations
    }

    /// Is the reveal mode currently on?
    #[inline]
    pub fn revealed(&self) -> bool {
        self.reveal.revealed()
    }

    /// Seconds of animation so far.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance the scene by `delta` seconds with the latest gesture and return the new frame.
    ///
    /// `gesture` should be `None` if no hand has been seen since the last tick. A negative or
    /// non-finite `delta` is treated as 0.
    pub fn tick(&mut self, delta: f32, gesture: Option<&GestureDescriptor>) -> SceneFrame {
        let delta = if delta.is_finite() { delta.max(0.) } else { 0. };
        self.time += delta;

        let control_config = &self.config.control;
        self.control.retarget(gesture, control_config);
        self.control.advance(delta, control_config);
        let explosion = self.control.explosion.current;

        if let Some(revealed) = self.reveal.update(explosion) {
            info!(revealed, explosion, "Reveal mode changed");
            if let Some(listener) = self.listener.as_mut() {
                listener.on_reveal_change(revealed);
            }
        }

        self.control
            .envelope
            .advance(explosion, delta, &self.config.envelope);

        self.tree_rotation +=
            self.control.rotation_speed.current * delta * control_config.reference_fps;
        self.dust.advance(delta);

        self.frame()
    }

    /// The frame for the current state, without advancing anything.
    pub fn frame(&self) -> SceneFrame {
        let explosion = self.control.explosion.current;
        let camera = &self.config.camera;

        SceneFrame {
            time: self.time,
            explosion,
            revealed: self.reveal.revealed(),
            camera: CameraPose {
                eye: Vec3::new(0., 0., self.control.zoom.current),
                target: Vec3::ZERO,
                up: Vec3::Y,
                aspect: self.viewport.aspect(),
                fovy_radians: camera.fovy_degrees.to_radians(),
                znear: camera.znear,
                zfar: camera.zfar,
            },
            tree_rotation: self.tree_rotation,
            tree: InstanceTransform {
                translation: Vec3::new(0., self.config.tree.height, 0.),
                rotation: Quat::from_rotation_y(self.tree_rotation),
                scale: Vec3::ONE,
            },
            populations: self
                .populations
                .iter()
                .map(|population| population.frame(self.time, explosion))
                .collect(),
            star: star_transform(self.time, &self.config.tree),
            envelope: self.control.envelope.pose(&self.config.envelope),
            sleigh: sleigh_transform(self.time, &self.config.sleigh),
            dust: self.dust.frame(self.time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::PopulationConfig, envelope::EnvelopePhase, population::SpinStyle};
    use float_cmp::approx_eq;
    use std::{cell::RefCell, rc::Rc};
    use ww_layout::LayoutParams;

    const DELTA: f32 = 1. / 60.;

    /// A small scene so the tests stay quick.
    fn config() -> SceneConfig {
        let mut config = SceneConfig::default();
        config.tree.populations = vec![
            PopulationConfig {
                name: "foliage".to_string(),
                layout: LayoutParams {
                    count: 40,
                    height_spread: 7.5,
                    radius_spread: 1.,
                    vertical_offset: 0.,
                },
                style: SpinStyle::Tumble,
            },
            PopulationConfig {
                name: "hearts".to_string(),
                layout: LayoutParams {
                    count: 12,
                    height_spread: 7.3,
                    radius_spread: 1.25,
                    vertical_offset: 0.5,
                },
                style: SpinStyle::Heart,
            },
        ];
        config.dust.count = 20;
        config
    }

    fn animator() -> SceneAnimator {
        SceneAnimator::with_rng(config(), &mut StdRng::seed_from_u64(12345))
    }

    fn recording(animator: &mut SceneAnimator) -> Rc<RefCell<Vec<bool>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        animator.set_reveal_listener(move |revealed: bool| sink.borrow_mut().push(revealed));
        calls
    }

    fn hand(is_fist: bool, is_open: bool) -> GestureDescriptor {
        GestureDescriptor {
            is_pinching: false,
            is_fist,
            is_open,
            position: Vec3::new(0.5, 0.5, 0.),
        }
    }

    #[test]
    fn open_hand_explodes_and_reveals_once() {
        let mut animator = animator();
        let calls = recording(&mut animator);
        let open = hand(false, true);

        for _ in 0..120 {
            animator.tick(DELTA, Some(&open));
        }

        let explosion = animator.control().explosion.current;
        assert!((1. - explosion).abs() < 0.01, "explosion is {explosion}");
        assert!(animator.revealed());
        assert_eq!(*calls.borrow(), [true]);
    }

    #[test]
    fn fist_after_open_hides_again() {
        let mut animator = animator();
        let calls = recording(&mut animator);

        for _ in 0..120 {
            animator.tick(DELTA, Some(&hand(false, true)));
        }
        for _ in 0..120 {
            animator.tick(DELTA, Some(&hand(true, false)));
        }

        assert!(!animator.revealed());
        assert!(animator.control().explosion.current < 0.01);
        assert_eq!(*calls.borrow(), [true, false]);
    }

    #[test]
    fn no_hand_idles_without_resetting() {
        let mut animator = animator();
        for _ in 0..60 {
            animator.tick(DELTA, Some(&hand(false, true)));
        }

        for _ in 0..60 * 30 {
            animator.tick(DELTA, None);
        }

        let control = animator.control();
        assert!(approx_eq!(
            f32,
            control.rotation_speed.current,
            0.005,
            epsilon = 1e-5
        ));
        assert_eq!(control.explosion.target, 1.);
        assert!(animator.revealed());
    }

    #[test]
    fn frame_matches_the_state() {
        let mut animator = animator();
        let frame = animator.tick(0., None);

        assert_eq!(frame.populations.len(), 2);
        assert_eq!(frame.instance_count(), 52);
        assert_eq!(frame.dust.positions.len(), 20);
        assert_eq!(frame.explosion, 0.);
        assert!(!frame.revealed);
        assert_eq!(frame.camera.eye, Vec3::new(0., 0., 32.));
        assert_eq!(frame.tree.translation, Vec3::new(0., 2.5, 0.));

        let hearts = frame.population("hearts").expect("hearts should be in the frame");
        let layout = animator.populations()[1].layout();
        for (transform, rest) in hearts.transforms.iter().zip(layout.rest()) {
            assert!(transform.translation.abs_diff_eq(*rest, 1e-6));
        }
    }

    #[test]
    fn envelope_opens_after_the_reveal() {
        let mut animator = animator();
        let open = hand(false, true);

        let mut saw_both = false;
        for _ in 0..60 * 10 {
            let frame = animator.tick(DELTA, Some(&open));
            if frame.envelope.transform.scale.x > 0. && frame.revealed {
                saw_both = true;
            }
            if frame.envelope.transform.scale.x > 0. {
                assert!(frame.explosion > 0.6);
            }
        }

        assert!(saw_both);
        assert_eq!(animator.control().envelope.phase(), EnvelopePhase::Unfurled);
    }

    #[test]
    fn resize_changes_the_aspect_ratio() {
        let mut animator = animator();
        animator.set_viewport(Viewport::new(800, 800));
        let frame = animator.tick(DELTA, None);
        assert_eq!(frame.camera.aspect, 1.);

        animator.set_viewport(Viewport::new(1920, 1080));
        let frame = animator.tick(DELTA, None);
        assert!(approx_eq!(f32, frame.camera.aspect, 16. / 9.));
    }

    #[test]
    fn tree_rotation_is_frame_rate_independent() {
        let mut config = config();
        config.control.idle_rotation_speed = config.control.initial_rotation_speed;

        let mut fast = SceneAnimator::with_rng(config.clone(), &mut StdRng::seed_from_u64(1));
        let mut slow = SceneAnimator::with_rng(config, &mut StdRng::seed_from_u64(1));

        for _ in 0..120 {
            fast.tick(1. / 120., None);
        }
        for _ in 0..30 {
            slow.tick(1. / 30., None);
        }

        let fast = fast.frame().tree_rotation;
        let slow = slow.frame().tree_rotation;
        assert!(approx_eq!(f32, fast, 3., epsilon = 1e-3), "{fast}");
        assert!(approx_eq!(f32, slow, 3., epsilon = 1e-3), "{slow}");
    }

    #[test]
    fn bad_deltas_freeze_time() {
        let mut animator = animator();
        animator.tick(0.5, None);

        for delta in [-1., f32::NAN, f32::INFINITY] {
            let frame = animator.tick(delta, Some(&hand(false, true)));
            assert_eq!(frame.time, 0.5);
            assert_eq!(frame.explosion, 0.);
        }
    }
}
