use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use xr_core::{HitResult, Pose};
use xr_pointer::{
    BallisticConfig, BallisticPointer, HapticConfig, PhysicalController, PointerConfigError,
    PointerDevice, StraightPointer,
};

#[derive(Debug, Default)]
struct ControllerLog {
    down: bool,
    up: bool,
    pulses: Vec<u16>,
}

#[derive(Debug, Clone, Default)]
struct ScriptedController(Rc<RefCell<ControllerLog>>);

impl PhysicalController for ScriptedController {
    fn press_down(&mut self) -> bool {
        std::mem::take(&mut self.0.borrow_mut().down)
    }

    fn press_up(&mut self) -> bool {
        std::mem::take(&mut self.0.borrow_mut().up)
    }

    fn haptic_pulse(&mut self, duration_micros: u16) {
        self.0.borrow_mut().pulses.push(duration_micros);
    }
}

fn no_hit(_: Vec3, _: Vec3) -> HitResult<u32> {
    HitResult::miss()
}

fn ground(origin: Vec3, direction: Vec3) -> HitResult<u32> {
    if direction.y >= 0.0 || origin.y <= 0.0 {
        return HitResult::miss();
    }
    HitResult::hit(5, origin.y / -direction.y)
}

#[test]
fn straight_pointer_follows_pose() {
    let mut pointer = StraightPointer::new(ScriptedController::default())
        .with_pose(Pose::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 2.0)));

    let ray = PointerDevice::<u32>::compute_ray(&mut pointer, &mut no_hit).expect("ray");
    assert_eq!(ray.origin, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(ray.direction, Vec3::Z);

    PointerDevice::<u32>::set_pose(&mut pointer, Pose::new(Vec3::ZERO, Vec3::ZERO));
    assert!(PointerDevice::<u32>::compute_ray(&mut pointer, &mut no_hit).is_none());
    assert!(pointer.last_ray().is_none());
}

#[test]
fn button_edges_and_haptics_go_through_controller() {
    let controller = ScriptedController::default();
    let log = controller.0.clone();
    let mut pointer = StraightPointer::new(controller).with_haptics(HapticConfig {
        enter_pulse_micros: 900,
        exit_pulse_micros: 300,
    });

    assert!(!PointerDevice::<u32>::button_down(&mut pointer));
    log.borrow_mut().down = true;
    assert!(PointerDevice::<u32>::button_down(&mut pointer));
    assert!(!PointerDevice::<u32>::button_down(&mut pointer));

    log.borrow_mut().up = true;
    assert!(PointerDevice::<u32>::button_up(&mut pointer));

    PointerDevice::<u32>::on_hover_enter(&mut pointer, 1);
    PointerDevice::<u32>::on_hover_exit(&mut pointer, 1);
    assert_eq!(log.borrow().pulses, vec![900, 300]);
}

#[test]
fn missing_controller_reports_no_edges() {
    let mut pointer = StraightPointer::new(None::<ScriptedController>);
    assert!(!PointerDevice::<u32>::button_down(&mut pointer));
    assert!(!PointerDevice::<u32>::button_up(&mut pointer));
    PointerDevice::<u32>::on_hover_enter(&mut pointer, 3);
}

#[test]
fn ballistic_pointer_lands_on_ground() {
    let mut pointer =
        BallisticPointer::new(ScriptedController::default(), BallisticConfig::default())
            .expect("valid config")
            .with_pose(Pose::new(Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.0, 0.5, 1.0)));

    let ray = PointerDevice::<u32>::compute_ray(&mut pointer, &mut ground).expect("ray");
    assert!(ray.direction.y < 0.0, "probe should be on the falling leg");

    let landing = pointer.arc_hit().expect("arc landed");
    assert!(landing.y.abs() < 1e-3);
    assert!(landing.z > 1.0);

    let points = pointer.arc_points();
    assert!(points.len() >= 2);
    assert_eq!(points[0], Vec3::new(0.0, 1.5, 0.0));
    assert!(points.last().expect("point").distance(landing) < 0.05);
    assert!(pointer.arc_time() > 0.0);
}

#[test]
fn ballistic_miss_still_aims_forward() {
    let config = BallisticConfig {
        max_path_length: 20.0,
        ..Default::default()
    };
    let mut pointer = BallisticPointer::new(ScriptedController::default(), config)
        .expect("valid config")
        .with_pose(Pose::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)));

    let ray = PointerDevice::<u32>::compute_ray(&mut pointer, &mut no_hit).expect("ray along aim");
    assert_eq!(ray.origin, Vec3::ZERO);
    assert_eq!(ray.direction, Vec3::X);
    assert!(pointer.arc_hit().is_none());
    assert!(pointer.arc_time() > 0.0);
    assert!(pointer.arc_points().len() <= pointer.config().arc_point_capacity);
}

#[test]
fn ballistic_without_aim_produces_no_ray() {
    let mut pointer =
        BallisticPointer::new(ScriptedController::default(), BallisticConfig::default())
            .expect("valid config")
            .with_pose(Pose::new(Vec3::ZERO, Vec3::ZERO));

    assert!(PointerDevice::<u32>::compute_ray(&mut pointer, &mut ground).is_none());
    assert!(pointer.arc_points().is_empty());
}

#[test]
fn ballistic_config_is_validated() {
    let bad_speed = BallisticConfig {
        launch_speed: f32::NAN,
        ..Default::default()
    };
    assert!(matches!(
        BallisticPointer::new(ScriptedController::default(), bad_speed),
        Err(PointerConfigError::InvalidLaunchSpeed(_))
    ));

    let mut bad_walk = BallisticConfig::default();
    bad_walk.walk.max_steps = 0;
    assert!(matches!(
        BallisticPointer::new(ScriptedController::default(), bad_walk),
        Err(PointerConfigError::Walk(_))
    ));
}
