// ============================================================================
// Tableau de marché
// ============================================================================
// 1. compute_derived : tri puis filtre du dernier dataset
// 2. table_rows / header_cells : modèle texte des lignes et en-têtes
// 3. render_table : dessin ratatui, reconstruit entièrement à chaque frame
//
// Le tri précède le filtre : l'ordre est conservé parmi les lignes retenues
// ============================================================================

use std::cmp::Ordering;

use feruca::Collator;
use num_format::Locale;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::format::{
    format_currency_opt, format_percentage_opt, sign_class_opt, SignClass, DEFAULT_PRECISION,
    MISSING,
};
use crate::models::{CoinRecord, Currency, FieldValue, SortDirection, SortField};

// ============================================================================
// Dataset dérivé
// ============================================================================

/// Trie `dataset` selon `sort_by` / `direction`, puis garde les coins dont
/// le nom ou le symbole contient `search_text` (insensible à la casse)
pub fn compute_derived(
    dataset: &[CoinRecord],
    sort_by: SortField,
    direction: SortDirection,
    search_text: &str,
) -> Vec<CoinRecord> {
    let mut sorted = dataset.to_vec();

    // Collation Unicode (racine CLDR) : "Æternity" se range avec les A
    let mut collator = Collator::default();

    // CONCEPT RUST : sort_by est stable et accepte un FnMut
    // - Les égalités gardent l'ordre de l'API
    // - La closure emprunte le collator en mutable (caches internes)
    sorted.sort_by(|a, b| {
        let ordering = compare_values(&mut collator, a.field(sort_by), b.field(sort_by));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let needle = search_text.to_lowercase();
    sorted
        .into_iter()
        .filter(|coin| coin.matches_search(&needle))
        .collect()
}

/// Compare deux valeurs de champ
///
/// - texte : collation Unicode, puis comparaison brute
/// - nombre : ordre total ; une valeur manquante est inférieure à toutes
fn compare_values(collator: &mut Collator, a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => {
            collator.collate(x, y).then_with(|| x.cmp(y))
        }
        (FieldValue::Number(x), FieldValue::Number(y)) => match (x, y) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        },
        // Un même champ ne mélange jamais texte et nombre
        (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
        (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
    }
}

// ============================================================================
// Modèle des lignes et en-têtes
// ============================================================================

/// Cellule de variation : texte + classe de signe
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeCell {
    pub text: String,
    pub sign: SignClass,
}

impl ChangeCell {
    fn new(value: Option<f64>) -> Self {
        Self {
            text: format_percentage_opt(value, DEFAULT_PRECISION),
            sign: sign_class_opt(value),
        }
    }
}

/// Une ligne du tableau, déjà formatée
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub rank: String,
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub change_1h: ChangeCell,
    pub change_24h: ChangeCell,
    pub change_7d: ChangeCell,
    pub volume: String,
    pub market_cap: String,
}

/// Formate chaque coin du dataset dérivé
pub fn table_rows(coins: &[CoinRecord], currency: Currency, locale: &Locale) -> Vec<TableRow> {
    coins
        .iter()
        .map(|coin| TableRow {
            rank: coin
                .market_cap_rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
            name: coin.name.clone(),
            symbol: coin.symbol.to_uppercase(),
            price: format_currency_opt(coin.current_price, currency, true, locale),
            change_1h: ChangeCell::new(coin.change_1h),
            change_24h: ChangeCell::new(coin.change_24h),
            change_7d: ChangeCell::new(coin.change_7d),
            volume: format_currency_opt(coin.total_volume, currency, false, locale),
            market_cap: format_currency_opt(coin.market_cap, currency, false, locale),
        })
        .collect()
}

/// En-tête d'une colonne triable
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub field: SortField,
    /// Touche qui "clique" sur la colonne
    pub key: char,
    pub label: &'static str,
    /// ▲ / ▼ sur la colonne active, None sur les autres
    pub indicator: Option<&'static str>,
}

impl HeaderCell {
    pub fn is_active(&self) -> bool {
        self.indicator.is_some()
    }

    pub fn title(&self) -> String {
        match self.indicator {
            Some(indicator) => format!("[{}] {} {}", self.key, self.label, indicator),
            None => format!("[{}] {}", self.key, self.label),
        }
    }
}

/// En-têtes de toutes les colonnes, la colonne active porte l'indicateur
pub fn header_cells(sort_by: SortField, direction: SortDirection) -> Vec<HeaderCell> {
    SortField::columns()
        .into_iter()
        .zip('1'..='9')
        .map(|(field, key)| HeaderCell {
            field,
            key,
            label: field.label(),
            indicator: (field == sort_by).then(|| direction.indicator()),
        })
        .collect()
}

// ============================================================================
// Rendu ratatui
// ============================================================================

fn sign_color(sign: SignClass) -> Color {
    match sign {
        SignClass::Positive => Color::Green,
        SignClass::Negative => Color::Red,
        SignClass::Neutral => Color::Gray,
    }
}

fn change_cell(cell: &ChangeCell) -> Cell<'static> {
    Cell::from(Span::styled(
        cell.text.clone(),
        Style::default().fg(sign_color(cell.sign)),
    ))
}

/// Dessine le tableau de marché dans `area`
pub fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let derived = app.derived();
    let rows = table_rows(&derived, app.view.currency, &app.locale);

    let title = if app.view.search_text.is_empty() {
        format!(" 📊 Marché ({} coins) ", rows.len())
    } else {
        format!(
            " 📊 Marché ({} / {} coins) ",
            rows.len(),
            app.view.last_dataset.len()
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);

    let header = Row::new(
        header_cells(app.view.sort_by, app.view.sort_direction)
            .into_iter()
            .map(|cell| {
                let style = if cell.is_active() {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                Cell::from(Span::styled(cell.title(), style))
            }),
    )
    .bottom_margin(1);

    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.rank.clone()),
                Cell::from(format!("{} ({})", row.name, row.symbol)),
                Cell::from(row.price.clone()),
                change_cell(&row.change_1h),
                change_cell(&row.change_24h),
                change_cell(&row.change_7d),
                Cell::from(row.volume.clone()),
                Cell::from(row.market_cap.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Min(22),
        Constraint::Length(18),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(22),
        Constraint::Length(24),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));

    let mut state = TableState::default();
    if !rows.is_empty() {
        state.select(Some(app.selected_index.min(rows.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(symbol: &str, name: &str, rank: Option<u32>, price: Option<f64>) -> CoinRecord {
        CoinRecord {
            id: name.to_lowercase(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            image: String::new(),
            market_cap_rank: rank,
            current_price: price,
            change_1h: Some(1.2345),
            change_24h: Some(-0.5),
            change_7d: None,
            total_volume: price.map(|p| p * 100.0),
            market_cap: price.map(|p| p * 10_000.0),
        }
    }

    fn sample() -> Vec<CoinRecord> {
        vec![
            coin("eth", "Ethereum", Some(2), Some(3000.0)),
            coin("btc", "Bitcoin", Some(1), Some(50000.0)),
            coin("doge", "Dogecoin", Some(3), Some(0.08)),
        ]
    }

    fn symbols(coins: &[CoinRecord]) -> Vec<&str> {
        coins.iter().map(|c| c.symbol.as_str()).collect()
    }

    #[test]
    fn test_sort_by_price_desc() {
        let derived = compute_derived(&sample(), SortField::Price, SortDirection::Desc, "");
        assert_eq!(symbols(&derived), vec!["btc", "eth", "doge"]);
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let mut data = sample();
        data.push(coin("abc", "aave", Some(4), Some(100.0)));
        let derived = compute_derived(&data, SortField::Name, SortDirection::Asc, "");
        assert_eq!(symbols(&derived), vec!["abc", "btc", "doge", "eth"]);
    }

    #[test]
    fn test_sort_by_name_follows_unicode_collation() {
        let data = vec![
            coin("zec", "Zcash", Some(1), Some(30.0)),
            coin("ae", "Æternity", Some(2), Some(0.05)),
            coin("ebn", "Ébène", Some(3), Some(1.0)),
            coin("btc", "Bitcoin", Some(4), Some(50000.0)),
        ];
        let derived = compute_derived(&data, SortField::Name, SortDirection::Asc, "");
        let names: Vec<&str> = derived.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Æternity", "Bitcoin", "Ébène", "Zcash"]);
    }

    #[test]
    fn test_desc_is_reverse_of_asc_without_ties() {
        for field in SortField::columns() {
            // Variations identiques dans l'échantillon : égalités, on saute
            if matches!(field, SortField::Change1h | SortField::Change24h | SortField::Change7d) {
                continue;
            }
            let asc = compute_derived(&sample(), field, SortDirection::Asc, "");
            let mut desc = compute_derived(&sample(), field, SortDirection::Desc, "");
            desc.reverse();
            assert_eq!(asc, desc, "field {:?}", field);
        }
    }

    #[test]
    fn test_search_filters_name_or_symbol() {
        let derived = compute_derived(&sample(), SortField::Rank, SortDirection::Asc, "do");
        assert_eq!(symbols(&derived), vec!["doge"]);

        let derived = compute_derived(&sample(), SortField::Rank, SortDirection::Asc, "BTC");
        assert_eq!(symbols(&derived), vec!["btc"]);

        let derived = compute_derived(&sample(), SortField::Rank, SortDirection::Asc, "");
        assert_eq!(symbols(&derived), vec!["btc", "eth", "doge"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = compute_derived(&sample(), SortField::Price, SortDirection::Asc, "e");
        let twice = compute_derived(&once, SortField::Price, SortDirection::Asc, "e");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_preserved_after_filter() {
        let derived = compute_derived(&sample(), SortField::Price, SortDirection::Asc, "coin");
        assert_eq!(symbols(&derived), vec!["doge", "btc"]);
    }

    #[test]
    fn test_missing_values_sort_lowest() {
        let mut data = sample();
        data.push(coin("new", "Newcoin", None, None));

        let asc = compute_derived(&data, SortField::Price, SortDirection::Asc, "");
        assert_eq!(asc[0].symbol, "new");

        let desc = compute_derived(&data, SortField::Rank, SortDirection::Desc, "");
        assert_eq!(desc.last().unwrap().symbol, "new");
    }

    #[test]
    fn test_table_rows_formatting() {
        let derived = compute_derived(&sample(), SortField::Rank, SortDirection::Asc, "");
        let rows = table_rows(&derived, Currency::USD, &Locale::en);

        assert_eq!(rows[0].rank, "1");
        assert_eq!(rows[0].symbol, "BTC");
        assert_eq!(rows[0].price, "$50,000.00");
        assert_eq!(rows[0].volume, "$5,000,000");
        assert_eq!(rows[0].market_cap, "$500,000,000");
        assert_eq!(rows[2].price, "$0.08000");

        assert_eq!(rows[0].change_1h.text, "1.23%");
        assert_eq!(rows[0].change_1h.sign, SignClass::Positive);
        assert_eq!(rows[0].change_24h.sign, SignClass::Negative);
    }

    #[test]
    fn test_missing_percentage_renders_neutral() {
        let mut data = sample();
        data.push(coin("new", "Newcoin", None, None));
        let rows = table_rows(&data, Currency::EUR, &Locale::en);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].change_7d.sign, SignClass::Neutral);
        assert_eq!(rows[0].change_7d.text, MISSING);
        assert_eq!(rows[3].rank, MISSING);
        assert_eq!(rows[3].price, MISSING);
    }

    #[test]
    fn test_header_marks_only_active_column() {
        let headers = header_cells(SortField::Price, SortDirection::Desc);
        assert_eq!(headers.len(), 8);

        let active: Vec<_> = headers.iter().filter(|h| h.is_active()).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].field, SortField::Price);
        assert_eq!(active[0].indicator, Some("▼"));
        assert_eq!(active[0].title(), "[3] Price ▼");

        let headers = header_cells(SortField::Rank, SortDirection::Asc);
        assert_eq!(headers[0].title(), "[1] # ▲");
        assert_eq!(headers[2].title(), "[3] Price");
    }
}
