use chrono::{Duration, Utc};
use shared::TaskStatus;

use crate::store::{NewTask, StoreError, TaskStore};

/// (title, description, status, created days ago, completed days ago)
const SAMPLES: &[(&str, &str, TaskStatus, i64, Option<i64>)] = &[
    ("Implementar autenticação", "Criar sistema de login e autenticação JWT", TaskStatus::Pending, 10, None),
    ("Configurar CI/CD", "Configurar pipeline de deploy automático", TaskStatus::InProgress, 8, None),
    ("Escrever testes unitários", "Criar testes para os controllers e serviços", TaskStatus::Pending, 6, None),
    ("Documentar API", "Criar documentação Swagger completa", TaskStatus::Completed, 15, Some(5)),
    ("Otimizar queries", "Melhorar performance das consultas ao banco", TaskStatus::Pending, 4, None),
    ("Implementar validações", "Adicionar validações de entrada nos endpoints", TaskStatus::InProgress, 3, None),
    ("Configurar logging", "Implementar sistema de logs estruturado", TaskStatus::Pending, 2, None),
    ("Criar dashboard", "Desenvolver interface de administração", TaskStatus::Completed, 12, Some(1)),
    ("Revisar código", "Fazer code review e refatoração", TaskStatus::Pending, 1, None),
    ("Preparar deploy", "Configurar ambiente de produção", TaskStatus::Pending, 0, None),
];

/// Fills an empty store with sample tasks. Returns how many were inserted;
/// a store that already has rows is left alone.
pub async fn seed_if_empty(store: &dyn TaskStore) -> Result<usize, StoreError> {
    if store.count().await? > 0 {
        return Ok(0);
    }

    let now = Utc::now();
    for (title, description, status, created_days_ago, completed_days_ago) in SAMPLES {
        store
            .insert(NewTask {
                title: title.to_string(),
                description: description.to_string(),
                status: status.clone(),
                completed: status.is_completed(),
                created_at: now - Duration::days(*created_days_ago),
                completed_at: completed_days_ago.map(|days| now - Duration::days(days)),
            })
            .await?;
    }

    Ok(SAMPLES.len())
}
