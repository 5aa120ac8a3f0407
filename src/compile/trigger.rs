//! Map enabled trigger bindings → compiled triggers.

use crate::model::TriggerBinding;

use super::types::CompiledTrigger;

/// Project every enabled binding. Disabled bindings are dropped entirely.
pub fn compile_triggers(bindings: &[TriggerBinding]) -> Vec<CompiledTrigger> {
    bindings
        .iter()
        .filter(|b| b.enabled)
        .map(compile_trigger)
        .collect()
}

fn compile_trigger(binding: &TriggerBinding) -> CompiledTrigger {
    let mut entries: Vec<_> = binding.node_bindings.iter().collect();
    entries.sort_by_key(|nb| nb.order);

    CompiledTrigger {
        trigger_id: binding.trigger.id.clone(),
        trigger_type: binding.trigger.trigger_type.clone(),
        config: binding.trigger.config.clone(),
        priority: binding.priority,
        entry_node_ids: entries.into_iter().map(|nb| nb.node_id.clone()).collect(),
    }
}
