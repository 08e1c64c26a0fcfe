use serde::Serialize;

/// Member of the team listed on the about page
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
    pub bio: &'static str,
    pub roll_number: &'static str,
    pub image: &'static str,
}

pub const TEAM: [TeamMember; 4] = [
    TeamMember {
        name: "Jagadeesh",
        role: "Founder & Lead",
        bio: "Drives product vision, DL integration, and platform scale.",
        roll_number: "22471A0502",
        image: "/static/team/22471A0502.jpg",
    },
    TeamMember {
        name: "Farooq",
        role: "Frontend Engineer",
        bio: "Builds delightful, accessible, fast UIs with Tailwind.",
        roll_number: "22471A0551",
        image: "/static/team/22471A0551.jpg",
    },
    TeamMember {
        name: "Noushik",
        role: "Backend Engineer",
        bio: "Scales APIs, optimizes data pipelines, and infra.",
        roll_number: "22471A0552",
        image: "/static/team/22471A0552.jpg",
    },
    TeamMember {
        name: "Balakrishna",
        role: "Documentation Specialist",
        bio: "Works on recommendations, evaluations, and metrics.",
        roll_number: "22471A0542",
        image: "/static/team/22471A0542.jpg",
    },
];
