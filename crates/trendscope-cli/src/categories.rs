//! `categories` command.

use trendscope_core::Category;

pub(crate) fn print_categories() {
    for line in category_lines() {
        println!("{line}");
    }
}

fn category_lines() -> Vec<String> {
    Category::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{:>2}. {:<14} {}", i + 1, c.name(), c.keywords().join(", ")))
        .collect()
}
