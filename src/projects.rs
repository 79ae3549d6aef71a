/// One Work-page entry.
#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub title: &'static str,
    pub year: &'static str,
    pub desc: &'static str,
    pub url: &'static str,
}

/// Selected work, newest first. The home page previews the first two.
pub const PROJECTS: [Project; 4] = [
    Project {
        title: "Keyflow",
        year: "2025",
        desc: "A minimalistic typing web app",
        url: "https://example.com/keyflow",
    },
    Project {
        title: "Phemis",
        year: "2024",
        desc: "Movie recommendation system",
        url: "https://example.com/phemis",
    },
    Project {
        title: "Network",
        year: "2024",
        desc: "Social networking site",
        url: "https://example.com/network",
    },
    Project {
        title: "CS50x",
        year: "2024",
        desc: "A curated collection of course projects",
        url: "https://example.com/cs50x",
    },
];

/// Contact-page entry.
#[derive(Debug, Clone, Copy)]
pub struct ContactEntry {
    pub label: &'static str,
    pub value: &'static str,
    pub url: &'static str,
}

pub const CONTACT: [ContactEntry; 3] = [
    ContactEntry {
        label: "Email",
        value: "hello@example.com",
        url: "mailto:hello@example.com",
    },
    ContactEntry {
        label: "Social",
        value: "@minimal",
        url: "https://example.com/@minimal",
    },
    ContactEntry {
        label: "Address",
        value: "Working globally",
        url: "https://example.com",
    },
];
