/// The panes of the page, in navigation order. Each one has an anchor that
/// can be typed into the input box, e.g. `#about`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    #[default]
    Home,
    Media,
    About,
    Services,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Media,
        Section::About,
        Section::Services,
        Section::Contact,
    ];

    pub fn anchor(&self) -> &'static str {
        match self {
            Section::Home => "#home",
            Section::Media => "#media",
            Section::About => "#about",
            Section::Services => "#services",
            Section::Contact => "#contact",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Media => "Media",
            Section::About => "About",
            Section::Services => "Services",
            Section::Contact => "Contact",
        }
    }

    pub fn from_anchor(s: &str) -> Option<Self> {
        let name = s.trim_start_matches('#');
        Self::ALL
            .iter()
            .find(|section| section.anchor()[1..].eq_ignore_ascii_case(name))
            .copied()
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Media,
    Joke,
}
