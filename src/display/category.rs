//! Category display formatting

use crate::models::Category;

/// Format the user's categories as an aligned list
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'budgetiq category seed' to create the defaults."
            .to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {}\n",
        "ID",
        "Name",
        "Color",
        name_width = name_width
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:-<7}\n",
        "",
        "",
        "",
        name_width = name_width
    ));

    for category in categories {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {}\n",
            category.id.to_string(),
            category.name,
            category.color,
            name_width = name_width
        ));
    }

    output
}

/// Format category details for display
pub fn format_category_details(category: &Category) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:      {}\n", category.id));
    output.push_str(&format!("  Color:   {}\n", category.color));
    output.push_str(&format!(
        "  Created: {}\n",
        category.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Color, UserId};

    #[test]
    fn test_format_empty_list() {
        assert!(format_category_list(&[]).contains("No categories found"));
    }

    #[test]
    fn test_format_list_shows_color() {
        let user = UserId::new();
        let categories = vec![
            Category::new(user, "Food", Color::from_rgb(0xF44336)),
            Category::new(user, "Entertainment", Color::GRAY),
        ];

        let output = format_category_list(&categories);
        assert!(output.contains("Food"));
        assert!(output.contains("#F44336"));
        assert!(output.contains("Entertainment  #9E9E9E"));
    }
}
