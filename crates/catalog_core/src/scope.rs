use std::fmt;
use std::str::FromStr;

/// A concrete catalog category. Declaration order is the canonical section order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Movies,
    Music,
    Apps,
    Books,
}

impl Category {
    /// Every category in canonical order.
    pub const ALL: [Category; 4] = [
        Category::Movies,
        Category::Music,
        Category::Apps,
        Category::Books,
    ];

    /// Value of the upstream `media` query parameter.
    pub fn media_token(self) -> &'static str {
        match self {
            Category::Movies => "movie",
            Category::Music => "music",
            Category::Apps => "software",
            Category::Books => "ebook",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Movies => "Movies",
            Category::Music => "Music",
            Category::Apps => "Apps",
            Category::Books => "Books",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Scope bar selection: one concrete category or the aggregate `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    #[default]
    All,
    Only(Category),
}

impl Scope {
    /// Scopes in scope-bar order.
    pub const ALL: [Scope; 5] = [
        Scope::All,
        Scope::Only(Category::Movies),
        Scope::Only(Category::Music),
        Scope::Only(Category::Apps),
        Scope::Only(Category::Books),
    ];

    pub fn media_token(self) -> &'static str {
        match self {
            Scope::All => "all",
            Scope::Only(category) => category.media_token(),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Scope::All => "All",
            Scope::Only(category) => category.title(),
        }
    }

    pub fn is_aggregate(self) -> bool {
        matches!(self, Scope::All)
    }

    /// Categories that must be fetched for this scope, in canonical order.
    pub fn categories(self) -> Vec<Category> {
        match self {
            Scope::All => Category::ALL.to_vec(),
            Scope::Only(category) => vec![category],
        }
    }
}

impl From<Category> for Scope {
    fn from(category: Category) -> Self {
        Scope::Only(category)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScope(pub String);

impl fmt::Display for UnknownScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scope {:?}", self.0)
    }
}

impl std::error::Error for UnknownScope {}

impl FromStr for Scope {
    type Err = UnknownScope;

    /// Accepts either the title or the media token, case-insensitively.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Scope::ALL
            .into_iter()
            .find(|scope| {
                scope.title().eq_ignore_ascii_case(wanted)
                    || scope.media_token().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownScope(raw.to_string()))
    }
}
