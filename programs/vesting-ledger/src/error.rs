use anchor_lang::prelude::*;

/// Custom error codes for the vesting ledger program.
#[error_code]
pub enum VestingError {
    #[msg("Unauthorized: admin signature required")]
    UnauthorizedAdmin,

    #[msg("Unauthorized: caller is neither the beneficiary nor the admin")]
    Unauthorized,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Invalid duration (must be > 0)")]
    InvalidDuration,

    #[msg("Invalid amount (must be > 0)")]
    InvalidAmount,

    #[msg("Invalid timestamp")]
    InvalidTimestamp,

    #[msg("Uncommitted vault balance is smaller than the schedule total")]
    InsufficientUncommittedBalance,

    #[msg("Schedule not found")]
    ScheduleNotFound,

    #[msg("Beneficiary already has a schedule that is still vesting")]
    ScheduleStillVesting,

    #[msg("Requested amount exceeds the vested, unreleased amount")]
    InsufficientVestedAmount,

    #[msg("Requested amount exceeds the withdrawable (uncommitted) balance")]
    InsufficientWithdrawableFunds,

    #[msg("Committed total exceeds the vault balance")]
    CommittedExceedsBalance,

    #[msg("Asset transfer failed")]
    TransferFailed,

    #[msg("Re-entrant call rejected")]
    Reentrancy,

    #[msg("Schedule registry is full")]
    RegistryFull,

    #[msg("Required account was not supplied")]
    MissingAccount,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Committed total does not match the schedule records")]
    CommittedTotalMismatch,
}

/// Coarse failure classes callers can branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Unauthorized,
    NotFound,
    InsufficientFunds,
    TransferFailure,
    Reentrancy,
    Internal,
}

impl VestingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VestingError::InvalidPubkey
            | VestingError::InvalidDuration
            | VestingError::InvalidAmount
            | VestingError::InvalidTimestamp
            | VestingError::ScheduleStillVesting
            | VestingError::InvalidTokenMint
            | VestingError::InvalidTokenAccount => ErrorKind::InvalidInput,
            VestingError::UnauthorizedAdmin | VestingError::Unauthorized => {
                ErrorKind::Unauthorized
            }
            VestingError::ScheduleNotFound => ErrorKind::NotFound,
            VestingError::InsufficientUncommittedBalance
            | VestingError::InsufficientVestedAmount
            | VestingError::InsufficientWithdrawableFunds => ErrorKind::InsufficientFunds,
            VestingError::TransferFailed => ErrorKind::TransferFailure,
            VestingError::Reentrancy => ErrorKind::Reentrancy,
            VestingError::CommittedExceedsBalance
            | VestingError::CommittedTotalMismatch
            | VestingError::RegistryFull
            | VestingError::MissingAccount
            | VestingError::MathOverflow => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_failure_class() {
        assert_eq!(VestingError::InvalidDuration.kind(), ErrorKind::InvalidInput);
        assert_eq!(VestingError::Unauthorized.kind(), ErrorKind::Unauthorized);
        assert_eq!(VestingError::ScheduleNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            VestingError::InsufficientWithdrawableFunds.kind(),
            ErrorKind::InsufficientFunds
        );
        assert_eq!(VestingError::TransferFailed.kind(), ErrorKind::TransferFailure);
        assert_eq!(VestingError::Reentrancy.kind(), ErrorKind::Reentrancy);
    }
}
