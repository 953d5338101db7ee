//! Static event catalog
//!
//! One `EventProfile` per `EventKind`: labels, target rooms, impact tables,
//! response gating, escalation and the per-robot thought pools. The
//! controller is generic over this data.

use crate::core::types::{RobotId, RoomId};
use crate::events::model::{EventKind, Severity};

/// How the response phase decides it is done
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseGate {
    /// Accumulate `responders × per_responder` each tick until 100
    Progress { per_responder: f32 },
    /// Fixed time in the response phase
    FixedDuration { minutes: f64 },
    /// Intruder flee time, shortened by responders and a triggered alarm
    Flee { base_minutes: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Escalation {
    /// Minutes between severity steps, counted from spawn
    pub after_minutes: f64,
    /// Flat (cleanliness, tidiness) hit to every other room at max severity
    pub collateral_at_max: Option<(f32, f32)>,
}

/// Flavor text keyed by robot
#[derive(Debug, Clone, Copy)]
pub struct ThoughtPool {
    pub sim: &'static [&'static str],
    pub chef: &'static [&'static str],
    pub sparkle: &'static [&'static str],
}

impl ThoughtPool {
    pub fn for_robot(&self, robot: RobotId) -> &'static [&'static str] {
        match robot {
            RobotId::Sim => self.sim,
            RobotId::Chef => self.chef,
            RobotId::Sparkle => self.sparkle,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Banner {
    /// `{prefix}{ROOM}{suffix}`
    Room(&'static str, &'static str),
    /// Fixed text, room ignored
    Fixed(&'static str),
}

impl Banner {
    fn render(&self, room_name: &str) -> String {
        match self {
            Banner::Room(prefix, suffix) => format!("{prefix}{}{suffix}", room_name.to_uppercase()),
            Banner::Fixed(text) => (*text).to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventProfile {
    pub kind: EventKind,
    pub label: &'static str,
    pub emoji: &'static str,
    pub target_rooms: &'static [RoomId],
    /// Signed room deltas per severity (index 0 = severity 1)
    pub cleanliness_impact: [f32; 3],
    pub tidiness_impact: [f32; 3],
    pub gate: ResponseGate,
    pub escalation: Option<Escalation>,
    /// 0-1; a camera roll must beat this to see the event
    pub stealth: f64,
    pub detection_thoughts: ThoughtPool,
    pub response_thoughts: ThoughtPool,
    pub resolution_thoughts: ThoughtPool,
    pub severity_labels: [&'static str; 3],
    /// Banner per severity (index 0 = severity 1)
    pub banners: [Banner; 3],
}

impl EventProfile {
    pub fn banner(&self, room_name: &str, severity: Severity) -> String {
        self.banners[severity.index()].render(room_name)
    }

    pub fn severity_label(&self, severity: Severity) -> &'static str {
        self.severity_labels[severity.index()]
    }

    /// Extra damage when stepping from `from` to `to`
    pub fn escalation_delta(&self, from: Severity, to: Severity) -> (f32, f32) {
        (
            self.cleanliness_impact[to.index()] - self.cleanliness_impact[from.index()],
            self.tidiness_impact[to.index()] - self.tidiness_impact[from.index()],
        )
    }

    pub fn impact(&self, severity: Severity) -> (f32, f32) {
        (
            self.cleanliness_impact[severity.index()],
            self.tidiness_impact[severity.index()],
        )
    }
}

pub fn profile(kind: EventKind) -> &'static EventProfile {
    &CATALOG[kind.index()]
}

const INDOOR: &[RoomId] = &[
    RoomId::LivingRoom,
    RoomId::Kitchen,
    RoomId::Bedroom,
    RoomId::Bathroom,
    RoomId::Hallway,
    RoomId::Laundry,
];

const fn flat(value: f32) -> [f32; 3] {
    [value, value, value]
}

static CATALOG: [EventProfile; 9] = [
    // ── Disasters ──
    EventProfile {
        kind: EventKind::Fire,
        label: "Fire",
        emoji: "🔥",
        target_rooms: &[RoomId::Kitchen, RoomId::LivingRoom, RoomId::Laundry],
        cleanliness_impact: [-20.0, -40.0, -60.0],
        tidiness_impact: [-15.0, -30.0, -50.0],
        gate: ResponseGate::Progress { per_responder: 3.5 },
        escalation: Some(Escalation { after_minutes: 8.0, collateral_at_max: None }),
        stealth: 0.0,
        detection_thoughts: ThoughtPool {
            sim: &[
                "FIRE! I smell smoke! Emergency protocols activated!",
                "Oh no — flames! Quick, grab the extinguisher!",
            ],
            chef: &[
                "FIRE IN THE KITCHEN! This is NOT a flambé! Emergency response!",
                "Smoke alarm triggered! Deploying fire suppression immediately!",
            ],
            sparkle: &[
                "FIRE?! The soot! The ASH! Must extinguish NOW!",
                "Flames detected! My pristine surfaces are in DANGER!",
            ],
        },
        response_thoughts: ThoughtPool {
            sim: &[
                "Rushing to help fight the fire! We can do this together!",
                "Grabbing the extinguisher — every second counts!",
            ],
            chef: &[
                "Moving to contain the blaze. Fire safety protocol engaged.",
                "Reinforcing fire response. Kitchen fires are MY specialty.",
            ],
            sparkle: &[
                "Racing to fight the fire! The cleanup afterward will be EPIC.",
                "Fire suppression mode! Must save the surfaces!",
            ],
        },
        resolution_thoughts: ThoughtPool {
            sim: &[
                "Fire is OUT! Phew! That was intense. Everyone okay?",
                "Flames extinguished! Time for recovery and cleanup.",
            ],
            chef: &[
                "Fire contained and extinguished. Damage assessment: manageable.",
                "Blaze eliminated. Resuming normal operations after cleanup.",
            ],
            sparkle: &[
                "Fire OUT! Now begins the REAL battle — soot removal!",
                "Extinguished! But the smoke stains... this will take hours.",
            ],
        },
        severity_labels: ["Small Fire", "Growing Fire", "Inferno"],
        banners: [
            Banner::Room("FIRE DETECTED IN ", ""),
            Banner::Room("FIRE SPREADING IN ", "!"),
            Banner::Room("INFERNO IN ", " — CRITICAL!"),
        ],
    },
    EventProfile {
        kind: EventKind::Flood,
        label: "Flood",
        emoji: "🌊",
        target_rooms: &[RoomId::Bathroom, RoomId::Kitchen, RoomId::Laundry],
        cleanliness_impact: [-25.0, -45.0, -65.0],
        tidiness_impact: [-20.0, -35.0, -55.0],
        gate: ResponseGate::Progress { per_responder: 3.0 },
        escalation: Some(Escalation { after_minutes: 10.0, collateral_at_max: None }),
        stealth: 0.0,
        detection_thoughts: ThoughtPool {
            sim: &[
                "Water everywhere! The floor is flooding! Emergency!",
                "A pipe burst! Water is rising fast — need to act NOW!",
            ],
            chef: &[
                "FLOODING! Water on the floor — electronics at risk!",
                "Major water breach detected. Initiating emergency drainage!",
            ],
            sparkle: &[
                "WATER?! On MY floors?! This is a CATASTROPHE!",
                "Flood alert! The water damage will be devastating!",
            ],
        },
        response_thoughts: ThoughtPool {
            sim: &[
                "On my way with towels and buckets! We'll stop this flood!",
                "Rushing to help — need to stop the water source!",
            ],
            chef: &[
                "Moving to contain the water. Precision mopping engaged.",
                "Joining flood response. Must protect the appliances.",
            ],
            sparkle: &[
                "Deploying MAXIMUM absorption! Not one drop gets away!",
                "Racing to mop! Every second means more water damage!",
            ],
        },
        resolution_thoughts: ThoughtPool {
            sim: &[
                "Flood contained! The water is receding. Great teamwork!",
                "All dried up! That was a close one.",
            ],
            chef: &[
                "Water breach sealed. Drying operations complete.",
                "Flood resolved. All systems nominal. Back to cooking.",
            ],
            sparkle: &[
                "Flood MOPPED! But the water stains... round two begins NOW.",
                "Dry at last! Now I need to sanitize everything the water touched.",
            ],
        },
        severity_labels: ["Water Leak", "Rising Water", "Submerged"],
        banners: [
            Banner::Room("WATER LEAK IN ", ""),
            Banner::Room("FLOOD RISING IN ", "!"),
            Banner::Room("", " SUBMERGED — EMERGENCY!"),
        ],
    },
    EventProfile {
        kind: EventKind::Earthquake,
        label: "Earthquake",
        emoji: "🏚️",
        target_rooms: INDOOR,
        cleanliness_impact: [-15.0, -30.0, -50.0],
        tidiness_impact: [-30.0, -50.0, -70.0],
        gate: ResponseGate::Progress { per_responder: 4.0 },
        escalation: Some(Escalation {
            after_minutes: 6.0,
            collateral_at_max: Some((-15.0, -25.0)),
        }),
        stealth: 0.0,
        detection_thoughts: ThoughtPool {
            sim: &[
                "The ground is SHAKING! Earthquake! Take cover!",
                "Everything is rattling! Earthquake alert!",
            ],
            chef: &[
                "Seismic activity! Securing the kitchen equipment NOW!",
                "EARTHQUAKE! Fragile items at risk! Emergency stabilization!",
            ],
            sparkle: &[
                "Everything is FALLING! My carefully organized shelves! NOOO!",
                "Earthquake! Things are crashing everywhere! Must secure items!",
            ],
        },
        response_thoughts: ThoughtPool {
            sim: &[
                "Heading to help secure the house! Stay safe everyone!",
                "Rushing to catch falling items and check for damage!",
            ],
            chef: &[
                "Moving to secure breakables. Systematic damage prevention.",
                "Reinforcing response. Structural integrity is priority one.",
            ],
            sparkle: &[
                "Must pick up EVERYTHING! The chaos is UNBEARABLE!",
                "Racing to re-organize! Every fallen item hurts my soul!",
            ],
        },
        resolution_thoughts: ThoughtPool {
            sim: &[
                "Shaking stopped! All clear — time to pick up the pieces.",
                "Earthquake over! Let's make sure everyone is okay.",
            ],
            chef: &[
                "Tremors ceased. Damage assessment: repairable. Resuming duties.",
                "Seismic event concluded. All equipment secured and operational.",
            ],
            sparkle: &[
                "It stopped! Now for the BIGGEST cleanup of my LIFE.",
                "Quake done. The mess level is... *recalibrating sensors*... catastrophic.",
            ],
        },
        severity_labels: ["Tremors", "Moderate Quake", "Major Earthquake"],
        banners: [
            Banner::Room("TREMORS DETECTED IN ", ""),
            Banner::Fixed("EARTHQUAKE — THINGS ARE FALLING!"),
            Banner::Fixed("MAJOR EARTHQUAKE — HOUSE SHAKING!"),
        ],
    },
    // ── Home events ──
    EventProfile {
        kind: EventKind::PlumbingLeak,
        label: "Plumbing Leak",
        emoji: "🚰",
        target_rooms: &[RoomId::Bathroom, RoomId::Kitchen],
        cleanliness_impact: flat(-25.0),
        tidiness_impact: flat(-15.0),
        gate: ResponseGate::FixedDuration { minutes: 18.0 },
        escalation: None,
        stealth: 0.0,
        detection_thoughts: ThoughtPool {
            sim: &[
                "Wait... is that water on the floor?! We have a leak!",
                "Oh no, there's water everywhere! Quick, I need to fix this!",
            ],
            chef: &[
                "Water on the floor! This is NOT part of the recipe!",
                "Leak detected. This kitchen runs a tight ship — fixing now.",
            ],
            sparkle: &[
                "WATER?! On MY clean floors?! Emergency mode activated!",
                "A leak! My pristine surfaces are being violated!",
            ],
        },
        response_thoughts: ThoughtPool {
            sim: &[
                "Rushing to help with the leak! Teamwork makes the dream work.",
                "On my way to help! Can't let the water spread.",
            ],
            chef: &[
                "Moving to contain the water damage. Precision response.",
                "Heading to assist. Water and electricity don't mix.",
            ],
            sparkle: &[
                "Racing to the leak! Every second means more water stains!",
                "Must. Stop. The water. Before it ruins EVERYTHING.",
            ],
        },
        resolution_thoughts: ThoughtPool {
            sim: &[
                "Leak fixed! Phew, that was a close one. Time to mop up.",
                "All patched up! The floor is drying nicely.",
            ],
            chef: &[
                "Pipe secured. Crisis averted. Back to business.",
                "Leak contained and repaired. Efficient response.",
            ],
            sparkle: &[
                "Leak FIXED. Now begins the REAL work — drying every last drop.",
                "Crisis resolved. But I won't rest until every water mark is gone.",
            ],
        },
        severity_labels: ["Plumbing Leak"; 3],
        banners: [Banner::Room("PLUMBING LEAK IN ", ""); 3],
    },
    EventProfile {
        kind: EventKind::PowerOutage,
        label: "Power Outage",
        emoji: "⚡",
        target_rooms: INDOOR,
        cleanliness_impact: flat(-5.0),
        tidiness_impact: flat(-10.0),
        gate: ResponseGate::FixedDuration { minutes: 14.0 },
        escalation: None,
        stealth: 0.0,
        detection_thoughts: ThoughtPool {
            sim: &[
                "The lights just went out! Don't panic — I've got my flashlight.",
                "Power outage! Stay calm, I'll find the breaker.",
            ],
            chef: &[
                "Darkness. The oven is down. I need to restore power immediately.",
                "Power failure. Switching to flashlight mode. Heading to the breaker.",
            ],
            sparkle: &[
                "I can't see dirt in the dark! Must restore power NOW!",
                "Lights out?! Flashlight on. Heading to fix this.",
            ],
        },
        response_thoughts: ThoughtPool {
            sim: &[
                "Flashlight mode engaged! Heading to the breaker panel.",
                "Navigating by flashlight. I can do this!",
            ],
            chef: &[
                "Following emergency protocol. Flashlight active.",
                "Moving to the breaker. The kitchen needs power.",
            ],
            sparkle: &[
                "Flashlight on max. Can't let dust accumulate unseen!",
                "Operating in emergency lighting. Must restore power.",
            ],
        },
        resolution_thoughts: ThoughtPool {
            sim: &[
                "Power restored! Let there be light! ...Still love saying that.",
                "Breaker flipped! Everything's back online.",
            ],
            chef: &[
                "Power restored. Oven status: operational. Crisis managed.",
                "Electricity flowing again. Back to peak performance.",
            ],
            sparkle: &[
                "LIGHTS ON! Now I can see every speck of dust again. Bliss.",
                "Power back! My UV sanitizer needs electricity, you know.",
            ],
        },
        severity_labels: ["Power Outage"; 3],
        banners: [Banner::Fixed("POWER OUTAGE — LIGHTS OUT!"); 3],
    },
    EventProfile {
        kind: EventKind::PestInvasion,
        label: "Pest Invasion",
        emoji: "🐛",
        target_rooms: &[RoomId::Kitchen, RoomId::LivingRoom, RoomId::Laundry, RoomId::Bedroom],
        cleanliness_impact: flat(-20.0),
        tidiness_impact: flat(-20.0),
        gate: ResponseGate::FixedDuration { minutes: 22.0 },
        escalation: None,
        stealth: 0.0,
        detection_thoughts: ThoughtPool {
            sim: &[
                "EEK! Are those bugs?! We have uninvited guests!",
                "Oh no, critters! I need to deal with this fast!",
            ],
            chef: &[
                "BUGS in my workspace?! Absolutely unacceptable! Exterminating!",
                "Pest alert! The kitchen must remain sanitary. Moving to intercept.",
            ],
            sparkle: &[
                "BUGS?! In THIS house?! Not on my watch! DEFCON 1!",
                "Pests detected! This is a hygiene EMERGENCY!",
            ],
        },
        response_thoughts: ThoughtPool {
            sim: &[
                "Coming to help with the bugs! Strength in numbers!",
                "On my way! Those critters don't stand a chance.",
            ],
            chef: &[
                "Reinforcing the pest response team. No bug survives.",
                "Joining the extermination effort. Zero tolerance policy.",
            ],
            sparkle: &[
                "Rushing to eliminate every last creepy-crawly!",
                "Deploying to assist! Every bug must GO!",
            ],
        },
        resolution_thoughts: ThoughtPool {
            sim: &[
                "All clear! The bugs are gone. House is safe again.",
                "Pest problem solved! Time for a thorough clean-up.",
            ],
            chef: &[
                "Pests eliminated. Sanitization in progress. Kitchen secured.",
                "All clear. My domain is pest-free once again.",
            ],
            sparkle: &[
                "EXTERMINATED. Every. Last. One. Now to sanitize EVERYTHING.",
                "Bugs: gone. Surfaces: about to be scrubbed within an inch of their lives.",
            ],
        },
        severity_labels: ["Pest Invasion"; 3],
        banners: [Banner::Room("PEST INVASION IN ", ""); 3],
    },
    // ── Intruders ──
    EventProfile {
        kind: EventKind::Burglar,
        label: "Burglar",
        emoji: "🥷",
        target_rooms: &[RoomId::LivingRoom, RoomId::Bedroom, RoomId::Kitchen],
        cleanliness_impact: flat(-10.0),
        tidiness_impact: flat(-20.0),
        gate: ResponseGate::Flee { base_minutes: 12.0 },
        escalation: None,
        stealth: 0.6,
        detection_thoughts: ThoughtPool {
            sim: &[
                "INTRUDER ALERT! Someone just broke a window!",
                "I hear suspicious noises... there's someone in the house!",
            ],
            chef: &[
                "Unauthorized individual detected. Initiating security protocol.",
                "My sensors are picking up an intruder! Nobody steals from this kitchen.",
            ],
            sparkle: &[
                "INTRUDER! They're getting FOOTPRINTS on my clean floors!",
                "Someone broke in! My pristine home is being VIOLATED!",
            ],
        },
        response_thoughts: ThoughtPool {
            sim: &[
                "Racing to confront the intruder! Be brave, be brave...",
                "Heading to intercept — they won't get away!",
            ],
            chef: &[
                "Moving to engage. Calculated response.",
                "Converging on intruder position. Stay alert.",
            ],
            sparkle: &[
                "Charging toward the intruder! Nobody messes with this house!",
                "Incoming! Prepare to be APPREHENDED!",
            ],
        },
        resolution_thoughts: ThoughtPool {
            sim: &[
                "Intruder scared off! The house is safe again.",
                "All clear! They ran when they saw all three of us.",
            ],
            chef: &[
                "Threat neutralized. Perimeter secured.",
                "Intruder has fled. Running damage assessment.",
            ],
            sparkle: &[
                "GET OUT AND STAY OUT! ...Now to clean up their mess.",
                "Security threat eliminated. Time to sanitize where they walked.",
            ],
        },
        severity_labels: ["Burglar"; 3],
        banners: [Banner::Room("BURGLAR IN ", "!"); 3],
    },
    EventProfile {
        kind: EventKind::Raccoon,
        label: "Raccoon",
        emoji: "🦝",
        target_rooms: &[RoomId::Kitchen, RoomId::Laundry],
        cleanliness_impact: flat(-18.0),
        tidiness_impact: flat(-15.0),
        gate: ResponseGate::Flee { base_minutes: 8.0 },
        escalation: None,
        stealth: 0.3,
        detection_thoughts: ThoughtPool {
            sim: &[
                "A raccoon got inside! It's raiding the kitchen!",
                "Oh no, a trash panda! Cute but destructive!",
            ],
            chef: &[
                "A RACCOON in MY kitchen?! This is a code red!",
                "Vermin in the pantry! Initiating pest removal.",
            ],
            sparkle: &[
                "A raccoon! It's making a MESS everywhere!",
                "Furry intruder detected! My clean floors!",
            ],
        },
        response_thoughts: ThoughtPool {
            sim: &[
                "Trying to shoo the raccoon out gently...",
                "Here, little guy, the door is this way!",
            ],
            chef: &[
                "Herding the raccoon toward the exit. Methodically.",
                "Cornering the pest. It won't escape with my food.",
            ],
            sparkle: &[
                "Get that trash goblin OUT before it ruins everything!",
                "Chasing the raccoon with a broom! HYAH!",
            ],
        },
        resolution_thoughts: ThoughtPool {
            sim: &[
                "The raccoon waddled away! Phew, what a mess though.",
                "Bye bye, little raccoon. Let's lock that pet door.",
            ],
            chef: &[
                "Pest removed. Inventorying food damage now.",
                "Raccoon evicted. Kitchen will need a deep clean.",
            ],
            sparkle: &[
                "Raccoon is GONE. The mess it left is NOT. Time to scrub.",
                "Finally! Now to undo the furry chaos.",
            ],
        },
        severity_labels: ["Raccoon"; 3],
        banners: [Banner::Room("RACCOON IN ", "!"); 3],
    },
    EventProfile {
        kind: EventKind::Prankster,
        label: "Prankster",
        emoji: "🎭",
        target_rooms: &[RoomId::LivingRoom, RoomId::Hallway, RoomId::Bedroom],
        cleanliness_impact: flat(-5.0),
        tidiness_impact: flat(-12.0),
        gate: ResponseGate::Flee { base_minutes: 6.0 },
        escalation: None,
        stealth: 0.4,
        detection_thoughts: ThoughtPool {
            sim: &[
                "Someone TP'd the living room?! Who does that?!",
                "I see a shadowy figure... is someone pranking us?",
            ],
            chef: &[
                "Childish vandalism detected. Unacceptable.",
                "Prank in progress! Moving to intercept the perpetrator.",
            ],
            sparkle: &[
                "TOILET PAPER EVERYWHERE! This is my worst nightmare!",
                "A prankster! The AUDACITY to mess up this house!",
            ],
        },
        response_thoughts: ThoughtPool {
            sim: &[
                "Chasing the prankster down! No more mischief!",
                "Come back here, you rascal!",
            ],
            chef: &[
                "Pursuing the vandal. They'll regret this.",
                "Tracking the intruder. Nowhere to hide.",
            ],
            sparkle: &[
                "When I catch them, they're going to CLEAN all this up!",
                "Running after the mess-maker! Justice will be served!",
            ],
        },
        resolution_thoughts: ThoughtPool {
            sim: &[
                "Prankster chased off! What a weird night.",
                "All clear. At least it was just a prank and nothing serious.",
            ],
            chef: &[
                "Vandal has departed. Assessing the clean-up requirements.",
                "Threat was low-level. Still unacceptable. Perimeter checked.",
            ],
            sparkle: &[
                "Prankster is GONE but the mess is NOT. Ugh.",
                "At least they're gone. Now... THE CLEANING BEGINS.",
            ],
        },
        severity_labels: ["Prankster"; 3],
        banners: [Banner::Room("PRANKSTER IN ", "!"); 3],
    },
];
