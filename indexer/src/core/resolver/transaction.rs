use crowdsale_common::{entity::Transaction, event::EventMeta};

use super::{Creations, EntityKind, Resolved};
use crate::core::{error::LedgerError, storage::Storage};

// One entry per transaction, whatever the number of logs it emitted
pub async fn fetch_transaction<S: Storage>(
    storage: &mut S,
    meta: &EventMeta,
    creations: &mut Creations,
) -> Result<Resolved<Transaction>, LedgerError> {
    let resolved = match storage.get_transaction(&meta.transaction_hash).await? {
        Some(transaction) => Resolved::Found(transaction),
        None => {
            let transaction = Transaction {
                id: meta.transaction_hash,
                block_number: meta.block_number,
                timestamp: meta.timestamp,
            };
            storage.set_transaction(&transaction).await?;
            Resolved::Created(transaction)
        }
    };

    creations.track(EntityKind::Transaction, &resolved);
    Ok(resolved)
}
