//! Console rendering for command results.
use colored::{ColoredString, Colorize};
use gacha_core::{
    Card, CollectionCounts, CollectionSummary, Dialogue, GachaResult, OwnedSet, Rarity, User,
};

fn rarity_label(rarity: Rarity) -> ColoredString {
    let label = format!("{} {:<9}", rarity.emoji(), rarity.as_str());
    let label = label.as_str();
    match rarity {
        Rarity::Common => label.normal(),
        Rarity::Rare => label.bright_blue(),
        Rarity::Epic => label.bright_magenta(),
        Rarity::Legendary => label.bright_yellow().bold(),
    }
}

#[must_use]
pub fn user_line(user: &User) -> String {
    format!(
        "{} {} (Lv.{}, {} EXP)  💰 {}  💎 {}",
        "👤".bold(),
        user.username.as_str().bright_cyan().bold(),
        user.level,
        user.experience_points,
        user.coins,
        user.gems
    )
}

#[must_use]
pub fn card_line(card: &Card, owned: Option<&OwnedSet>) -> String {
    let marker = match owned {
        Some(set) if set.contains(card.id) => "✔".green(),
        Some(_) => "🔒".normal(),
        None => " ".normal(),
    };
    format!(
        "{marker} #{:<4} {:<24} {} {} {:<6} ATK {:>3}  DEF {:>3}  COST {:>2}",
        card.id,
        card.name,
        rarity_label(card.rarity),
        card.element.emoji(),
        card.element.as_str(),
        card.attack,
        card.defense,
        card.cost
    )
}

#[must_use]
pub fn counts_line(counts: &CollectionCounts, shown: usize) -> String {
    format!(
        "Showing {shown} cards · all {} · owned {} · missing {}",
        counts.total, counts.owned, counts.missing
    )
    .as_str()
    .dimmed()
    .to_string()
}

#[must_use]
pub fn pull_summary(result: &GachaResult) -> Vec<String> {
    let mut lines = vec![format!(
        "{} You pulled {} cards for {} ({})",
        "🎉".bold(),
        result.cards.len(),
        result.total_cost,
        result.pull_type.currency()
    )];
    lines.extend(result.cards.iter().map(|card| card_line(card, None)));
    lines.push(format!(
        "Remaining: {} coins | {} gems",
        result.remaining_coins, result.remaining_gems
    ));
    lines
}

fn dialogue_line(line: &Dialogue) -> String {
    match line.emotion_type.as_deref().filter(|e| !e.is_empty()) {
        Some(emotion) => format!("        {}: {} ({emotion})", line.speaker.as_str().bold(), line.text),
        None => format!("        {}: {}", line.speaker.as_str().bold(), line.text),
    }
}

#[must_use]
pub fn collection_lines(collection: &CollectionSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "📚 {} {}",
        collection.name.as_str().bright_cyan().bold(),
        format!("(#{} · card #{})", collection.id, collection.card_id)
            .as_str()
            .dimmed()
    )];
    lines.push(format!(
        "   {}",
        collection
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("No description provided.")
    ));
    let mut images: Vec<_> = collection.images.iter().collect();
    images.sort_by_key(|image| image.order_index);
    for image in images {
        lines.push(format!(
            "   🖼  #{} {} {}",
            image.id,
            image.title.as_deref().unwrap_or("Untitled image"),
            image.image_url.as_str().dimmed()
        ));
        let mut dialogues: Vec<_> = image.dialogues.iter().collect();
        dialogues.sort_by_key(|d| d.order_index);
        lines.extend(dialogues.into_iter().map(dialogue_line));
    }
    lines
}

#[must_use]
pub fn dialogue_lines(dialogues: &[Dialogue]) -> Vec<String> {
    let mut sorted: Vec<_> = dialogues.iter().collect();
    sorted.sort_by_key(|d| d.order_index);
    sorted.into_iter().map(dialogue_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gacha_core::{CollectionImage, Element, PullType};

    fn card(id: i64, rarity: Rarity) -> Card {
        Card {
            id,
            name: format!("Card {id}"),
            description: None,
            attack: 5,
            defense: 2,
            cost: 1,
            rarity,
            element: Element::Water,
            image_url: None,
        }
    }

    #[test]
    fn card_line_marks_ownership() {
        colored::control::set_override(false);
        let owned = OwnedSet::from_cards(&[card(1, Rarity::Rare)]);
        assert!(card_line(&card(1, Rarity::Rare), Some(&owned)).starts_with('✔'));
        assert!(card_line(&card(2, Rarity::Rare), Some(&owned)).starts_with("🔒"));
        let line = card_line(&card(3, Rarity::Epic), None);
        assert!(line.contains("EPIC"));
        assert!(line.contains("ATK   5"));
    }

    #[test]
    fn pull_summary_lists_every_card_and_balance() {
        colored::control::set_override(false);
        let result = GachaResult {
            cards: vec![card(1, Rarity::Common), card(2, Rarity::Legendary)],
            pull_type: PullType::TenCoin,
            total_cost: 900,
            remaining_coins: 100,
            remaining_gems: 4,
        };
        let lines = pull_summary(&result);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("900"));
        assert_eq!(lines[3], "Remaining: 100 coins | 4 gems");
    }

    #[test]
    fn collection_images_and_lines_follow_order_index() {
        colored::control::set_override(false);
        let line = |id, order, text: &str| Dialogue {
            id,
            image_id: 5,
            text: text.into(),
            speaker: "Aoi".into(),
            order_index: order,
            emotion_type: None,
            created_at: None,
            updated_at: None,
        };
        let collection = CollectionSummary {
            id: 3,
            card_id: 1,
            name: "Summer".into(),
            description: None,
            images: vec![CollectionImage {
                id: 5,
                collection_id: 3,
                image_url: "/uploads/beach.png".into(),
                title: None,
                description: None,
                order_index: 0,
                dialogues: vec![line(2, 2, "second"), line(1, 1, "first")],
            }],
        };
        let lines = collection_lines(&collection);
        assert!(lines[1].contains("No description provided."));
        assert!(lines[2].contains("Untitled image"));
        assert!(lines[3].ends_with("first"));
        assert!(lines[4].ends_with("second"));
    }
}
