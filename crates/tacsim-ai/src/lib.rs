//! Non-player entity AI: behavior finite state machines and archetype
//! profiles, generalized across patrol/station-keep loiter behavior and
//! the engaged Cruise→PopUp→Terminal→Evasive threat chain.

pub mod fsm;
pub mod profiles;

#[cfg(test)]
mod tests;
