//! Responder selection: who notices an event first, and who rallies after
//!
//! Both scans walk robots in `RobotId::ALL` order, so assignment is
//! stable rather than rotating.

use crate::core::config::DistanceMode;
use crate::core::types::{RobotId, RoomId};
use crate::entity::robot::Robot;
use crate::world::layout::HouseLayout;

/// Ranking used when no robot stands in the event room
pub trait DistanceMetric: Send + Sync {
    fn distance(&self, robot: &Robot, room: RoomId, layout: &HouseLayout) -> f32;
}

/// Robot's own distance from the world origin, whatever the event room
#[derive(Debug, Clone, Copy, Default)]
pub struct OriginDistance;

impl DistanceMetric for OriginDistance {
    fn distance(&self, robot: &Robot, _room: RoomId, _layout: &HouseLayout) -> f32 {
        robot.position.floor_length()
    }
}

/// Robot's distance to the event room's centre
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomCenterDistance;

impl DistanceMetric for RoomCenterDistance {
    fn distance(&self, robot: &Robot, room: RoomId, layout: &HouseLayout) -> f32 {
        match layout.center(room) {
            Some((x, z)) => robot.position.floor_distance(x, z),
            None => f32::INFINITY,
        }
    }
}

pub fn metric_for(mode: DistanceMode) -> Box<dyn DistanceMetric> {
    match mode {
        DistanceMode::Origin => Box::new(OriginDistance),
        DistanceMode::RoomCenter => Box::new(RoomCenterDistance),
    }
}

/// Pick the single robot that detects an event in `room`
///
/// A robot standing in the room wins outright (first in order). Otherwise
/// the smallest metric wins, ties to the earlier robot. With no robots at
/// all the household default `RobotId::Sim` is returned.
pub fn select_detector(
    room: RoomId,
    robots: &[&Robot],
    layout: &HouseLayout,
    metric: &dyn DistanceMetric,
) -> RobotId {
    let mut closest = RobotId::Sim;
    let mut closest_dist = f32::INFINITY;

    for robot in robots {
        if layout.room_at(robot.position.x, robot.position.z) == Some(room) {
            return robot.id;
        }
        let dist = metric.distance(robot, room, layout);
        if dist < closest_dist {
            closest_dist = dist;
            closest = robot.id;
        }
    }

    closest
}

/// Robots eligible to join an event, in fixed order
///
/// Skips robots already responding, charging, or at or below
/// `battery_floor` percent.
pub fn rally_candidates(responding: &[RobotId], robots: &[&Robot], battery_floor: f32) -> Vec<RobotId> {
    robots
        .iter()
        .filter(|r| !responding.contains(&r.id))
        .filter(|r| !r.is_charging && r.battery > battery_floor)
        .map(|r| r.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;

    fn robot(id: RobotId, x: f32, z: f32) -> Robot {
        Robot::new(id).at(Vec3::new(x, 0.0, z))
    }

    #[test]
    fn test_co_located_robot_wins_over_closer_to_origin() {
        let layout = HouseLayout::default();
        // sim sits at the origin-adjacent hallway, sparkle in the bathroom
        let sim = robot(RobotId::Sim, 0.0, -1.0);
        let chef = robot(RobotId::Chef, -8.0, 8.0);
        let sparkle = robot(RobotId::Sparkle, 8.0, 8.0);
        let robots = [&sim, &chef, &sparkle];

        let detector = select_detector(RoomId::Bathroom, &robots, &layout, &OriginDistance);
        assert_eq!(detector, RobotId::Sparkle);
    }

    #[test]
    fn test_origin_metric_ignores_event_room() {
        let layout = HouseLayout::default();
        let sim = robot(RobotId::Sim, -10.0, -15.0);
        let chef = robot(RobotId::Chef, 2.0, 2.0);
        let sparkle = robot(RobotId::Sparkle, 30.0, 30.0);
        let robots = [&sim, &chef, &sparkle];

        // Nobody is in the kitchen; chef is nearest the origin
        let detector = select_detector(RoomId::Kitchen, &robots, &layout, &OriginDistance);
        assert_eq!(detector, RobotId::Chef);
    }

    #[test]
    fn test_room_center_metric_prefers_nearest_to_room() {
        let layout = HouseLayout::default();
        let sim = robot(RobotId::Sim, -8.0, 8.0);
        let chef = robot(RobotId::Chef, 2.0, 2.0);
        let sparkle = robot(RobotId::Sparkle, 40.0, -12.0);
        let robots = [&sim, &chef, &sparkle];

        let detector = select_detector(RoomId::Kitchen, &robots, &layout, &RoomCenterDistance);
        assert_eq!(detector, RobotId::Chef);
        let far = select_detector(RoomId::Yard, &[&sparkle], &layout, &RoomCenterDistance);
        assert_eq!(far, RobotId::Sparkle);
    }

    #[test]
    fn test_first_co_located_robot_wins() {
        let layout = HouseLayout::default();
        let chef = robot(RobotId::Chef, 8.0, -12.0);
        let sparkle = robot(RobotId::Sparkle, 9.0, -11.0);
        let detector = select_detector(RoomId::Kitchen, &[&chef, &sparkle], &layout, &OriginDistance);
        assert_eq!(detector, RobotId::Chef);
    }

    #[test]
    fn test_no_robots_defaults_to_sim() {
        let layout = HouseLayout::default();
        assert_eq!(select_detector(RoomId::Kitchen, &[], &layout, &OriginDistance), RobotId::Sim);
    }

    #[test]
    fn test_rally_skips_charging_and_low_battery() {
        let sim = Robot::new(RobotId::Sim);
        let chef = Robot::new(RobotId::Chef).charging(true);
        let sparkle = Robot::new(RobotId::Sparkle).with_battery(5.0);
        let robots = [&sim, &chef, &sparkle];

        assert!(rally_candidates(&[RobotId::Sim], &robots, 5.0).is_empty());

        let sparkle = Robot::new(RobotId::Sparkle).with_battery(5.5);
        let robots = [&sim, &chef, &sparkle];
        assert_eq!(rally_candidates(&[RobotId::Sim], &robots, 5.0), vec![RobotId::Sparkle]);
    }
}
