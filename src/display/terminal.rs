use std::fmt::Write;

use crate::display::{Card, Grid, ResultsView, View};

fn card(ret: &mut String, index: usize, card: &Card) {
    let _ = writeln!(ret, "{:>2}. {} [{}]", index + 1, card.name, card.badge);
    let _ = writeln!(ret, "    {}", card.category);
    if let Some(price) = &card.price {
        let _ = writeln!(ret, "    {}", price);
    }
    if let Some(rating) = &card.rating {
        let _ = writeln!(ret, "    {}", rating);
    }
    let _ = writeln!(
        ret,
        "    {}",
        t!("card.image", url = card.image_url, fallback = card.fallback_image)
    );
    let _ = writeln!(ret, "    {}: {}", card.link_label, card.link);
}

fn results(ret: &mut String, results: &ResultsView) {
    let preview = &results.preview;
    let line = match preview.dimensions {
        Some((width, height)) => t!(
            "results.preview_dimensions",
            width = width,
            height = height,
            size = preview.bytes.len()
        ),
        None => t!("results.preview", size = preview.bytes.len()),
    };
    ret.push_str(&line);
    ret.push('\n');

    let cards = results.grid.cards();
    ret.push_str(&t!(
        "results.header",
        shown = cards.len(),
        total = results.total,
        percent = (results.threshold * 100.0).round() as i64
    ));
    ret.push('\n');

    match &results.grid {
        Grid::Empty => {
            ret.push_str(&t!("results.none"));
            ret.push('\n');
        }
        Grid::Cards(cards) => {
            for (index, item) in cards.iter().enumerate() {
                card(ret, index, item);
            }
        }
    }
}

/// Text for a whole view. The same view always yields the same text.
pub fn format(view: &View) -> String {
    let mut ret = String::new();

    if let Some(lines) = &view.debug {
        let _ = writeln!(ret, "--- {} ---", t!("debug.title"));
        for line in lines {
            let _ = writeln!(ret, "{}", line);
        }
        ret.push_str("---\n");
    }

    if view.drop_zone.highlighted {
        let _ = writeln!(ret, ">> {} <<", view.drop_zone.label);
    } else {
        let _ = writeln!(ret, "{}", view.drop_zone.label);
    }

    if let Some(name) = &view.selection {
        let _ = writeln!(ret, "{}", t!("status.selected", name = name));
    }

    if view.loading {
        let _ = writeln!(ret, "{}", t!("status.loading"));
    }
    if !view.triggers_enabled {
        let _ = writeln!(ret, "{}", t!("status.triggers_disabled"));
    }

    if let Some(message) = &view.error {
        let _ = writeln!(ret, "{}", t!("status.error", message = message));
    }

    if let Some(view) = &view.results {
        results(&mut ret, view);
    }

    ret
}
