use crate::core::error::VaultError;

/// rofi exits with `9 + N` when `-kb-custom-N` is pressed.
pub const KB_CUSTOM_BASE: i32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyField {
    Password,
    Username,
    Otp,
    Url,
    Domain,
    UserDomain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What to do with the selected credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Copy(CopyField),
    Delete,
    Reorder(Direction),
    OpenUrl,
}

impl Action {
    /// Every action bound to a custom key, in `-kb-custom-N` order starting at N = 1.
    pub const BOUND: [Action; 10] = [
        Action::Copy(CopyField::Password),
        Action::Copy(CopyField::Username),
        Action::Delete,
        Action::Copy(CopyField::Otp),
        Action::Copy(CopyField::Url),
        Action::Copy(CopyField::Domain),
        Action::Copy(CopyField::UserDomain),
        Action::Reorder(Direction::Up),
        Action::Reorder(Direction::Down),
        Action::OpenUrl,
    ];

    pub fn from_status(code: i32) -> Result<Action, VaultError> {
        let action = match code {
            0 | 10 => Action::Copy(CopyField::Password),
            11 => Action::Copy(CopyField::Username),
            12 => Action::Delete,
            13 => Action::Copy(CopyField::Otp),
            14 => Action::Copy(CopyField::Url),
            15 => Action::Copy(CopyField::Domain),
            16 => Action::Copy(CopyField::UserDomain),
            17 => Action::Reorder(Direction::Up),
            18 => Action::Reorder(Direction::Down),
            19 => Action::OpenUrl,
            other => return Err(VaultError::UnexpectedStatus(other)),
        };
        Ok(action)
    }

    /// Structural actions change the set and send the user back to the picker.
    pub fn is_structural(&self) -> bool {
        matches!(self, Action::Delete | Action::Reorder(_))
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Action::Copy(CopyField::Password) => "Copy Password",
            Action::Copy(CopyField::Username) => "Copy Username",
            Action::Copy(CopyField::Otp) => "Copy OTP Value",
            Action::Copy(CopyField::Url) => "Copy URL Value",
            Action::Copy(CopyField::Domain) => "Copy Domain",
            Action::Copy(CopyField::UserDomain) => "Copy User with Domain",
            Action::Delete => "Delete Credential",
            Action::Reorder(Direction::Up) => "Move Credential one Up",
            Action::Reorder(Direction::Down) => "Move Credential one Down",
            Action::OpenUrl => "Open URL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_actions_round_trip_through_status_codes() {
        for (i, action) in Action::BOUND.iter().enumerate() {
            let code = KB_CUSTOM_BASE + i as i32 + 1;
            assert_eq!(Action::from_status(code).unwrap(), *action);
        }
    }

    #[test]
    fn accept_copies_password() {
        assert_eq!(
            Action::from_status(0).unwrap(),
            Action::Copy(CopyField::Password)
        );
    }

    #[test]
    fn unknown_codes_are_rejected() {
        for code in [1, 9, 20, 99, -1] {
            assert_eq!(
                Action::from_status(code),
                Err(VaultError::UnexpectedStatus(code))
            );
        }
    }

    #[test]
    fn only_delete_and_reorder_are_structural() {
        let structural: Vec<Action> = Action::BOUND
            .into_iter()
            .filter(Action::is_structural)
            .collect();
        assert_eq!(
            structural,
            vec![
                Action::Delete,
                Action::Reorder(Direction::Up),
                Action::Reorder(Direction::Down)
            ]
        );
    }
}
