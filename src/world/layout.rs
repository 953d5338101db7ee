//! House floor plan: room rectangles on the x/z floor plane

use serde::{Deserialize, Serialize};

use crate::core::types::RoomId;

/// Floor-plan scale factor of the default house
const S: f32 = 2.0;

/// Axis-aligned room footprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomRect {
    pub id: RoomId,
    /// Centre on the floor plane (x, z)
    pub center: (f32, f32),
    /// Width along x, depth along z
    pub size: (f32, f32),
}

impl RoomRect {
    pub fn new(id: RoomId, center: (f32, f32), size: (f32, f32)) -> Self {
        Self { id, center, size }
    }

    /// Edges are inclusive; shared walls resolve to the earlier room
    pub fn contains(&self, x: f32, z: f32) -> bool {
        let half_w = self.size.0 / 2.0;
        let half_d = self.size.1 / 2.0;
        (x - self.center.0).abs() <= half_w && (z - self.center.1).abs() <= half_d
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseLayout {
    rooms: Vec<RoomRect>,
}

impl Default for HouseLayout {
    fn default() -> Self {
        Self::new(vec![
            RoomRect::new(RoomId::LivingRoom, (-4.0 * S, -6.0 * S), (8.0 * S, 8.0 * S)),
            RoomRect::new(RoomId::Kitchen, (4.0 * S, -6.0 * S), (8.0 * S, 8.0 * S)),
            RoomRect::new(RoomId::Hallway, (-2.0 * S, -1.0 * S), (12.0 * S, 2.0 * S)),
            RoomRect::new(RoomId::Laundry, (5.0 * S, -1.0 * S), (3.0 * S, 2.0 * S)),
            RoomRect::new(RoomId::Bedroom, (-4.0 * S, 4.0 * S), (8.0 * S, 8.0 * S)),
            RoomRect::new(RoomId::Bathroom, (4.0 * S, 4.0 * S), (8.0 * S, 8.0 * S)),
            RoomRect::new(RoomId::Yard, (0.0, 12.0 * S), (16.0 * S, 8.0 * S)),
        ])
    }
}

impl HouseLayout {
    pub fn new(rooms: Vec<RoomRect>) -> Self {
        Self { rooms }
    }

    pub fn rooms(&self) -> &[RoomRect] {
        &self.rooms
    }

    /// Room containing a floor point, first match in layout order
    pub fn room_at(&self, x: f32, z: f32) -> Option<RoomId> {
        self.rooms.iter().find(|r| r.contains(x, z)).map(|r| r.id)
    }

    pub fn center(&self, room: RoomId) -> Option<(f32, f32)> {
        self.rooms.iter().find(|r| r.id == room).map(|r| r.center)
    }
}
