//! Static portfolio content. Inert data for the showcase and demos.

/// Rotating hero titles.
pub const HERO_PHRASES: &[&str] = &[
    "Software Engineer",
    "Frontend Developer",
    "Backend Engineer",
    "React/NextJs Specialist",
    "Problem Solver",
];

/// One entry on the journey timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
}

pub const TIMELINE: &[TimelineEntry] = &[
    TimelineEntry {
        id: "00",
        title: "Robotics Journey - Roborave 2017",
        summary: "Built Arduino and LEGO robots; placed 3rd at RoboRave, Abeokuta.",
    },
    TimelineEntry {
        id: "01",
        title: "B.Sc in Electrical and Electronics Engineering",
        summary: "Embedded systems, IoT and software architecture.",
    },
    TimelineEntry {
        id: "02",
        title: "Self-Taught Developer",
        summary: "Python in 2019, a web development bootcamp in 2020.",
    },
    TimelineEntry {
        id: "03",
        title: "RadicalX Hackathon 2021",
        summary: "Led a team building a generative AI diagnostic chatbot.",
    },
    TimelineEntry {
        id: "04",
        title: "Frontend Intern - Codeware Nigeria (2023)",
        summary: "Shipped a vendor procurement and bidding platform.",
    },
    TimelineEntry {
        id: "05",
        title: "HatchDev Full Stack Training - Nithub (2024)",
        summary: "Selected among 2000+ applicants; moved to full stack.",
    },
    TimelineEntry {
        id: "06",
        title: "Frontend Engineer - ZakatChain.io (2024)",
        summary: "Blockchain-powered platform for transparent donations.",
    },
    TimelineEntry {
        id: "07",
        title: "Frontend Engineer - Curaboard (2024)",
        summary: "Auth SDK integrations with Shopify, Wix and Ecwid.",
    },
    TimelineEntry {
        id: "08",
        title: "Training Department Lead - ECX",
        summary: "Led the frontend track, then the whole training department.",
    },
    TimelineEntry {
        id: "09",
        title: "Event Host - IEEE",
        summary: "Anchored tech events and panel sessions.",
    },
    TimelineEntry {
        id: "10",
        title: "Event Planner - Engineering Ladies Initiative",
        summary: "Organised events on women's roles in engineering.",
    },
    TimelineEntry {
        id: "11",
        title: "Lead Full Stack Engineer - Heem Walker",
        summary: "Brand site with a Three.js 3D shoe preview.",
    },
    TimelineEntry {
        id: "12",
        title: "Lead Full Stack Engineer - Kasatanos Coffee",
        summary: "Ordering tools for customers and staff.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub company: &'static str,
    pub quote: &'static str,
}

impl Testimonial {
    /// First letter of each word in the name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        name: "Mr Tomiwa",
        role: "Co-Founder",
        company: "Kastanos Coffee Shop",
        quote: "Faisal delivered an exceptional product that exceeded our expectations.",
    },
    Testimonial {
        name: "Mr Raheem",
        role: "CEO",
        company: "Heem Walker",
        quote: "Not just a developer, but a strategic thinker. Our conversion rates increased by 45%.",
    },
    Testimonial {
        name: "David Okunoye (Drex)",
        role: "Technical Lead",
        company: "Curaboard",
        quote: "Clean, well-documented code. He quickly became an essential part of our team.",
    },
    Testimonial {
        name: "Ademide Ajose",
        role: "CEO",
        company: "Curaboard",
        quote: "Page load times decreased by 70% and our SEO rankings significantly improved.",
    },
];
