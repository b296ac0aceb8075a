use taskboard_database::ProfileError;

/// Check that a client-supplied id matches the authenticated user.
///
/// A payload without an id inherits the principal's id. Any other id is
/// rejected before the payload reaches storage.
pub fn assure_id_consistent(
    supplied: Option<i64>,
    principal_id: i64,
) -> Result<(), ProfileError> {
    match supplied {
        None => Ok(()),
        Some(id) if id == principal_id => Ok(()),
        Some(id) => Err(ProfileError::IllegalRequestData(format!(
            "payload id {id} does not match authenticated user {principal_id}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_consistency() {
        assert!(assure_id_consistent(None, 42).is_ok());
        assert!(assure_id_consistent(Some(42), 42).is_ok());

        assert!(assure_id_consistent(Some(7), 42).is_err());
        // clients sometimes send -1 as a "no id" placeholder; it is not one
        let err = assure_id_consistent(Some(-1), 42).unwrap_err();
        assert!(matches!(err, ProfileError::IllegalRequestData(_)));
        assert!(err.to_string().contains("-1"));
    }
}
