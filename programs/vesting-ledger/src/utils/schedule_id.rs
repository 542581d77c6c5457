//! Deterministic schedule identifiers.
//!
//! An id is `blake3(domain_tag || beneficiary)`, so each beneficiary maps to
//! exactly one schedule slot.

use anchor_lang::prelude::Pubkey;
use bytemuck::{Pod, Zeroable};

use crate::constants::SCHEDULE_ID_DOMAIN;

pub type ScheduleId = [u8; 32];

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct IdPreimage {
    domain: [u8; 8],
    beneficiary: [u8; 32],
}

pub fn schedule_id(beneficiary: &Pubkey) -> ScheduleId {
    let preimage = IdPreimage {
        domain: SCHEDULE_ID_DOMAIN,
        beneficiary: beneficiary.to_bytes(),
    };
    *blake3::hash(bytemuck::bytes_of(&preimage)).as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_stable_per_beneficiary() {
        let alice = Pubkey::new_unique();
        assert_eq!(schedule_id(&alice), schedule_id(&alice));
    }

    #[test]
    fn distinct_beneficiaries_get_distinct_ids() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        assert_ne!(schedule_id(&alice), schedule_id(&bob));
    }

    #[test]
    fn id_is_domain_separated_from_plain_hash() {
        let alice = Pubkey::new_unique();
        assert_ne!(schedule_id(&alice), *blake3::hash(alice.as_ref()).as_bytes());
    }
}
