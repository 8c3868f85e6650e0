// ============================================================================
// Contrôleur des interactions
// ============================================================================
// Transforme les actions utilisateur en modifications de ViewState
//
// CONCEPTS :
// 1. Command pattern : Action décrit l'intention, apply_action l'exécute
// 2. Seul un changement de devise (ou un refresh) déclenche un fetch :
//    tri et recherche réutilisent le dataset déjà chargé
// 3. Générations : chaque requête reçoit un numéro croissant, seule la
//    réponse à la dernière requête émise est appliquée
// ============================================================================

use std::sync::mpsc;

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::api::MarketSource;
use crate::app::App;
use crate::error::MarketError;
use crate::models::{CoinRecord, Currency, SortField};

/// Actions de l'utilisateur sur le tableau
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Clic sur l'en-tête d'une colonne
    SortBy(SortField),

    /// Remplace le texte de recherche
    SetSearch(String),

    /// Ajoute un caractère à la recherche (saisie)
    PushSearchChar(char),

    /// Supprime le dernier caractère de la recherche
    PopSearchChar,

    /// Bouton "reset search" : recherche vidée
    ResetSearch,

    /// Choix d'une devise dans le sélecteur
    SelectCurrency(Currency),

    /// Recharge la devise courante
    Refresh,
}

/// Requête de fetch à exécuter par le worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub currency: Currency,
}

/// Résultat d'un fetch, renvoyé au contrôleur
#[derive(Debug)]
pub struct FetchResponse {
    pub generation: u64,
    pub currency: Currency,
    pub result: Result<Vec<CoinRecord>, MarketError>,
}

/// Applique une action à l'état de l'application
///
/// Retourne Some(FetchRequest) quand l'action exige un nouveau fetch ;
/// l'appelant doit l'exécuter puis passer la réponse à `complete_fetch`
pub fn apply_action(app: &mut App, action: Action) -> Option<FetchRequest> {
    match action {
        Action::SortBy(field) => {
            app.view.toggle_sort(field);
            debug!(sort_by = ?app.view.sort_by, direction = ?app.view.sort_direction, "Sort changed");
            None
        }
        Action::SetSearch(text) => {
            app.view.search_text = text;
            app.clamp_selection();
            None
        }
        Action::PushSearchChar(c) => {
            app.view.search_text.push(c);
            app.clamp_selection();
            None
        }
        Action::PopSearchChar => {
            app.view.search_text.pop();
            app.clamp_selection();
            None
        }
        Action::ResetSearch => {
            app.view.search_text.clear();
            app.clamp_selection();
            None
        }
        Action::SelectCurrency(currency) => {
            if currency != app.view.currency {
                info!(from = %app.view.currency, to = %currency, "Currency changed");
                app.view.currency = currency;
                // Les prix de l'ancienne devise ne doivent plus être affichés
                app.view.last_dataset.clear();
                app.selected_index = 0;
            }
            Some(begin_fetch(app))
        }
        Action::Refresh => Some(begin_fetch(app)),
    }
}

/// Premier cycle fetch-and-render, avec l'état par défaut
pub fn start_initial_load(app: &mut App) -> FetchRequest {
    info!(currency = %app.view.currency, "Initial market load");
    begin_fetch(app)
}

/// Émet une nouvelle requête pour la devise courante et affiche l'indicateur
fn begin_fetch(app: &mut App) -> FetchRequest {
    app.latest_generation += 1;
    let request = FetchRequest {
        generation: app.latest_generation,
        currency: app.view.currency,
    };

    app.start_loading(Some(format!(
        "Chargement des prix en {}...",
        request.currency.code()
    )));
    debug!(generation = request.generation, currency = %request.currency, "Fetch requested");

    request
}

/// Exécute une requête sur la source de données
///
/// Seul point de suspension du cycle : l'attente de la réponse
pub async fn run_fetch<S>(source: &S, request: FetchRequest) -> FetchResponse
where
    S: MarketSource + ?Sized,
{
    let result = source.fetch_market(request.currency).await;
    FetchResponse {
        generation: request.generation,
        currency: request.currency,
        result,
    }
}

/// Garde la plus récente des requêtes en attente sur le channel
///
/// Les requêtes dépassées ne font pas d'appel HTTP : leur réponse
/// serait de toute façon ignorée par `complete_fetch`
pub fn latest_request(first: FetchRequest, pending: &mpsc::Receiver<FetchRequest>) -> FetchRequest {
    let mut latest = first;
    while let Ok(next) = pending.try_recv() {
        debug!(
            skipped = latest.generation,
            latest = next.generation,
            "Superseded fetch request skipped"
        );
        latest = next;
    }
    latest
}

/// Applique la réponse d'un fetch à l'état
///
/// Retourne false si la réponse est périmée (une requête plus récente
/// a été émise) : elle est ignorée et l'indicateur reste affiché pour
/// la requête en cours
pub fn complete_fetch(app: &mut App, response: FetchResponse) -> bool {
    if response.generation != app.latest_generation {
        debug!(
            generation = response.generation,
            latest = app.latest_generation,
            currency = %response.currency,
            "Dropping stale market response"
        );
        return false;
    }

    // Succès ou échec, l'indicateur est masqué
    app.stop_loading();

    match response.result {
        Ok(dataset) => {
            info!(coins = dataset.len(), currency = %response.currency, "Market data applied");
            app.view.last_dataset = dataset;
            app.last_error = None;
            app.last_updated = Some(Local::now());
            app.clamp_selection();
        }
        Err(e) => {
            if e.is_retriable() {
                warn!(error = %e, currency = %response.currency, "Market fetch failed (retriable)");
                app.last_error = Some(format!("{} - [r] pour réessayer", e));
            } else {
                error!(error = ?e, currency = %response.currency, "Market fetch failed");
                app.last_error = Some(e.to_string());
            }
        }
    }

    true
}

/// Cycle complet : fetch puis application de la réponse
pub async fn fetch_cycle<S>(app: &mut App, source: &S, request: FetchRequest) -> bool
where
    S: MarketSource + ?Sized,
{
    let response = run_fetch(source, request).await;
    complete_fetch(app, response)
}

// ============================================================================
// Tests
// ============================================================================
