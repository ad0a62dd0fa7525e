pub mod card;
pub mod terminal;

pub use card::Card;

use crate::{
    input::DropZone,
    models::{Preview, Product},
    state::AppState,
};

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300?text=Image+Not+Found";

/// Products at or above `threshold`, in backend order.
pub fn filter(products: &[Product], threshold: f64) -> Vec<&Product> {
    products
        .iter()
        .filter(|product| product.meets(threshold))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Grid {
    /// The "no results" indicator; the grid itself is empty.
    Empty,
    Cards(Vec<Card>),
}

impl Grid {
    pub fn cards(&self) -> &[Card] {
        match self {
            Grid::Empty => &[],
            Grid::Cards(cards) => cards,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub preview: Preview,
    pub threshold: f64,
    pub total: usize,
    pub grid: Grid,
}

/// Description of everything on screen. Built fresh for every render.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub error: Option<String>,
    pub loading: bool,
    pub triggers_enabled: bool,
    pub drop_zone: DropZone,
    pub selection: Option<String>,
    pub results: Option<ResultsView>,
    pub debug: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    placeholder_image: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(PLACEHOLDER_IMAGE)
    }
}

impl Renderer {
    pub fn new(placeholder_image: impl Into<String>) -> Self {
        Self {
            placeholder_image: placeholder_image.into(),
        }
    }

    pub fn grid(&self, products: &[Product], threshold: f64) -> Grid {
        let cards: Vec<Card> = filter(products, threshold)
            .into_iter()
            .map(|product| Card::new(product, &self.placeholder_image))
            .collect();

        if cards.is_empty() {
            Grid::Empty
        } else {
            Grid::Cards(cards)
        }
    }

    /// Pure function of the state. Nothing is carried over from a previous render.
    pub fn render(&self, state: &AppState) -> View {
        let results = state.results.as_ref().map(|results| ResultsView {
            preview: results.preview.clone(),
            threshold: state.threshold,
            total: results.products.len(),
            grid: self.grid(&results.products, state.threshold),
        });

        View {
            error: state.status.error.clone(),
            loading: state.status.loading,
            triggers_enabled: state.triggers_enabled(),
            drop_zone: state.drop_zone.clone(),
            selection: state.selection.as_ref().map(|s| s.name.clone()),
            results,
            debug: state.debug.visible.then(|| state.debug.lines.clone()),
        }
    }
}
