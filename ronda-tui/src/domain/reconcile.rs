use std::collections::{BTreeSet, HashSet};

use ronda_api::domain::{CondominioId, RondaEsporadica};

use super::Patrol;

/// Names of condominiums with a locally saved patrol that the backend has
/// not confirmed as executed. Patrols saved without a condominium id can
/// never be confirmed and are always pending.
pub fn pending_condominiums(saved: &[Patrol], executed: &[RondaEsporadica]) -> Vec<String> {
    let confirmed: HashSet<CondominioId> = executed.iter().map(|r| r.condominio_id).collect();

    saved
        .iter()
        .filter(|p| !p.condominio_id.is_some_and(|id| confirmed.contains(&id)))
        .map(|p| p.residencial.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct condominiums the backend has to be asked about, one query each.
pub fn condominiums_to_confirm(saved: &[Patrol]) -> Vec<CondominioId> {
    saved
        .iter()
        .filter_map(|p| p.condominio_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatrolStatus;
    use pretty_assertions::assert_eq;
    use ronda_api::domain::RondaId;
    use time::macros::{date, time};

    fn saved(nome: &str, id: i64) -> Patrol {
        Patrol {
            id: None,
            residencial: nome.to_string(),
            condominio_id: Some(CondominioId::new(id)),
            inicio: time!(19:00),
            termino: Some(time!(19:20)),
            duracao: Some(20),
            status: PatrolStatus::Finalizada,
        }
    }

    fn executed(id: i64, nome: &str) -> RondaEsporadica {
        RondaEsporadica {
            id: RondaId::new(100 + id),
            condominio_id: CondominioId::new(id),
            condominio_nome: Some(nome.to_string()),
            user_id: None,
            user_nome: None,
            data_plantao: date!(2026 - 10 - 19),
            hora_entrada: Some(time!(19:00)),
            hora_saida: Some(time!(19:20)),
            duracao_minutos: Some(20),
            duracao_formatada: None,
            escala_plantao: "18 às 06".to_string(),
            turno: None,
            observacoes: None,
            status: "finalizada".to_string(),
        }
    }

    #[test]
    fn unconfirmed_condominiums_are_pending_once() {
        let saved = [saved("A", 1), saved("B", 2), saved("A", 1)];
        let executed = [executed(1, "A")];

        assert_eq!(pending_condominiums(&saved, &executed), vec!["B".to_string()]);
    }

    #[test]
    fn join_uses_id_not_name() {
        // Same display name, different condominium.
        let saved = [saved("Residencial Central", 7)];
        let executed = [executed(8, "Residencial Central")];

        assert_eq!(
            pending_condominiums(&saved, &executed),
            vec!["Residencial Central".to_string()]
        );
    }

    #[test]
    fn patrols_without_id_stay_pending_and_output_is_sorted() {
        let mut sem_id = saved("Zeta", 0);
        sem_id.condominio_id = None;
        let saved = [sem_id, saved("Beta", 2), saved("Alfa", 3)];

        assert_eq!(
            pending_condominiums(&saved, &[]),
            vec!["Alfa".to_string(), "Beta".to_string(), "Zeta".to_string()]
        );
    }

    #[test]
    fn nothing_saved_means_nothing_pending() {
        assert!(pending_condominiums(&[], &[executed(1, "A")]).is_empty());
    }

    #[test]
    fn each_condominium_is_queried_once() {
        let mut local = saved("Sem cadastro", 0);
        local.condominio_id = None;
        let patrols = [saved("B", 4), saved("A", 2), saved("B", 4), local];

        assert_eq!(
            condominiums_to_confirm(&patrols),
            vec![CondominioId::new(2), CondominioId::new(4)]
        );
    }
}
