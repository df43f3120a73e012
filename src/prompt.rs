//! 対話式フォーム入力

use crate::error::{Result, SuiviError};
use dialoguer::{Confirm, Input, Select};
use suivi_candidatures_common::{RecordDraft, Reponse, Visite};

fn prompt_err(e: dialoguer::Error) -> SuiviError {
    SuiviError::Prompt(e.to_string())
}

fn text(prompt: &str, initial: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)
}

/// 下書きの各項目を順に入力（Enterで現在値を維持）
pub fn edit_draft(draft: &mut RecordDraft) -> Result<()> {
    draft.restaurant = text("Restaurant *", &draft.restaurant)?;
    draft.date_envoi = text("Date d'envoi (AAAA-MM-JJ)", &draft.date_envoi)?;
    draft.telephone = text("Téléphone", &draft.telephone)?;
    draft.chef = text("Chef", &draft.chef)?;

    let visites = [Visite::Pending, Visite::Oui, Visite::Non];
    let current = visites.iter().position(|v| *v == draft.visite).unwrap_or(0);
    let picked = Select::new()
        .with_prompt("Visite effectuée")
        .items(&visites.map(|v| v.label()))
        .default(current)
        .interact()
        .map_err(prompt_err)?;
    draft.visite = visites[picked];

    let reponses = [Reponse::Pending, Reponse::Positive, Reponse::Negative];
    let current = reponses.iter().position(|r| *r == draft.reponse).unwrap_or(0);
    let picked = Select::new()
        .with_prompt("Réponse")
        .items(&reponses.map(|r| r.label()))
        .default(current)
        .interact()
        .map_err(prompt_err)?;
    draft.reponse = reponses[picked];

    draft.lat = text("Latitude", &draft.lat)?;
    draft.lng = text("Longitude", &draft.lng)?;
    draft.commentaires = text("Commentaires", &draft.commentaires)?;
    Ok(())
}

/// 削除確認
pub fn confirm_delete(restaurant: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("Voulez-vous vraiment supprimer {} ?", restaurant))
        .default(false)
        .interact()
        .map_err(prompt_err)
}
