use crate::model::ValueSelector;

use super::catalog::Variable;

/// Keep every variable.
pub fn any_var(_var: &Variable, _selector: &ValueSelector) -> bool {
    true
}

/// Keep file-typed variables only (`file` and `array[file]`).
pub fn file_var(var: &Variable, _selector: &ValueSelector) -> bool {
    var.var_type.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VarType;

    fn var(var_type: VarType) -> Variable {
        Variable {
            variable: "v".to_string(),
            var_type,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_file_var() {
        let sel = ValueSelector::new("n", "v");
        assert!(file_var(&var(VarType::File), &sel));
        assert!(file_var(&var(VarType::ArrayFile), &sel));
        assert!(!file_var(&var(VarType::String), &sel));
        assert!(any_var(&var(VarType::String), &sel));
    }
}
