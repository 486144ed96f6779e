//! The fixed universe of selectable cuisines.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

/// Cuisines offered by the form when no override is configured.
pub const DEFAULT_CUISINES: &[&str] = &[
    "American",
    "BBQ",
    "Breakfast",
    "Burgers",
    "Cafe",
    "Chinese",
    "Desserts",
    "French",
    "Greek",
    "Healthy",
    "Indian",
    "Italian",
    "Japanese",
    "Mexican",
    "Noodles",
    "Organic",
    "Pasta",
    "Pizza",
    "Salads",
    "Seafood",
    "Spanish",
    "Steak",
    "Sushi",
    "Tapas",
    "Thai",
    "Turkish",
    "Vegan",
    "Vegetarian",
];

/// Ordered, duplicate-free list of cuisines the owner may tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CuisineCatalog {
    cuisines: Vec<String>,
}

impl Default for CuisineCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_CUISINES.iter().copied())
    }
}

impl CuisineCatalog {
    /// Build a catalog, dropping blanks and repeated entries while keeping order.
    pub fn new<I, S>(cuisines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for cuisine in cuisines {
            let cuisine = cuisine.as_ref().trim();
            if !cuisine.is_empty() && !out.iter().any(|c| c == cuisine) {
                out.push(cuisine.to_owned());
            }
        }
        Self { cuisines: out }
    }

    /// Parse a comma-separated list such as `"Thai, Sushi,Vegan"`.
    pub fn parse_list(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn contains(&self, cuisine: &str) -> bool {
        self.cuisines.iter().any(|c| c == cuisine)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cuisines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cuisines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuisines.is_empty()
    }
}
