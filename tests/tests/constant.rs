//! Constant types under the default policy: every attribute is a constant.

use constclass_tests::prelude::*;

fn standard(registry: &mut ConstantRegistry) -> TypeId {
    registry
        .define("StandardConstant")
        .extends(ROOT_TYPE)
        .member("FOO", "foo")
        .member("BAR", "bar")
        .member("BAZ", "baz")
        .done()
        .unwrap()
}

mod root {
    use super::*;

    #[test]
    fn test_root_rejects_writes() {
        let mut registry = ConstantRegistry::new();
        let root = registry.root();

        for name in ["FOO", "BAR", "BAZ"] {
            assert_rejected(
                registry.set_attr(root, name, "new"),
                Expectation::new(Rejection::Assignment).names(&[name]),
            );
        }
        assert!(registry.attrs(root).is_empty());
    }
}

mod standard_constant {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_constant_read() {
        let mut registry = ConstantRegistry::new();
        let k = standard(&mut registry);

        assert_eq!(registry.get_attr(k, "FOO"), Some(&Value::from("foo")));
        assert_eq!(registry.get_attr(k, "BAR"), Some(&Value::from("bar")));
        assert_eq!(registry.get_attr(k, "BAZ"), Some(&Value::from("baz")));
    }

    #[test]
    fn test_constant_overwrite() {
        let mut registry = ConstantRegistry::new();
        let k = standard(&mut registry);

        for name in ["FOO", "BAR", "BAZ"] {
            assert_rejected(
                registry.set_attr(k, name, "changed"),
                Expectation::new(Rejection::Assignment).message_contains("StandardConstant"),
            );
        }
        assert_eq!(registry.get_attr(k, "FOO"), Some(&Value::from("foo")));
    }

    #[test]
    fn test_undeclared_attribute_write() {
        let mut registry = ConstantRegistry::new();
        let k = standard(&mut registry);

        assert_rejected(
            registry.set_attr(k, "FIZZ", "fizz"),
            Expectation::new(Rejection::Assignment).names(&["FIZZ"]),
        );
        assert_rejected(
            registry.set_attr(k, "buzz", "buzz"),
            Expectation::new(Rejection::Assignment).names(&["buzz"]),
        );
        assert_eq!(registry.get_attr(k, "FIZZ"), None);
    }

    #[test]
    fn test_instantiation() {
        let mut registry = ConstantRegistry::new();
        let k = standard(&mut registry);

        assert_rejected(
            registry.instantiate(k),
            Expectation::new(Rejection::Instantiation).message_contains("StandardConstant"),
        );
        assert_rejected(
            registry.instantiate(registry.root()),
            Expectation::new(Rejection::Instantiation),
        );
    }

    #[test]
    fn test_magic_members_pass_through() {
        let mut registry = ConstantRegistry::new();
        let k = registry
            .define("Documented")
            .member("__doc__", "Settings")
            .member("FOO", "foo")
            .done()
            .unwrap();

        assert_eq!(registry.get_attr(k, "__doc__"), Some(&Value::from("Settings")));
        assert_eq!(
            registry.constant_names(k).into_iter().collect::<Vec<_>>(),
            vec!["FOO"]
        );
    }
}

mod inheritance {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extend_constant() {
        let mut registry = ConstantRegistry::new();
        registry
            .define("BaseConstant")
            .extends(ROOT_TYPE)
            .member("FOO", "foo")
            .member("BAR", "bar")
            .member("BAZ", "baz")
            .done()
            .unwrap();
        let extend = registry
            .define("ExtendConstant")
            .extends("BaseConstant")
            .member("FIZZ", "fizz")
            .member("BUZZ", "buzz")
            .done()
            .unwrap();

        for (name, value) in [
            ("FOO", "foo"),
            ("BAR", "bar"),
            ("BAZ", "baz"),
            ("FIZZ", "fizz"),
            ("BUZZ", "buzz"),
        ] {
            assert_eq!(registry.get_attr(extend, name), Some(&Value::from(value)));
        }
    }

    #[test]
    fn test_multi_extend_constant() {
        let mut registry = ConstantRegistry::new();
        registry
            .define("ConstantFOO")
            .extends(ROOT_TYPE)
            .member("FOO", "foo")
            .done()
            .unwrap();
        registry
            .define("ConstantBAR")
            .extends(ROOT_TYPE)
            .member("BAR", "bar")
            .done()
            .unwrap();
        let foobar = registry
            .define("ConstantFOOBAR")
            .extends("ConstantFOO")
            .extends("ConstantBAR")
            .member("FOOBAR", "foobar")
            .done()
            .unwrap();

        assert_eq!(registry.get_attr(foobar, "FOO"), Some(&Value::from("foo")));
        assert_eq!(registry.get_attr(foobar, "BAR"), Some(&Value::from("bar")));
        assert_eq!(registry.get_attr(foobar, "FOOBAR"), Some(&Value::from("foobar")));
        assert_eq!(
            registry.constant_names(foobar).into_iter().collect::<Vec<_>>(),
            vec!["BAR", "FOO", "FOOBAR"]
        );
    }

    #[test]
    fn test_collision_constant() {
        let mut registry = ConstantRegistry::new();
        registry
            .define("ConstantFOOX")
            .extends(ROOT_TYPE)
            .member("FOO", "foox")
            .done()
            .unwrap();
        registry
            .define("ConstantFOOY")
            .extends(ROOT_TYPE)
            .member("FOO", "fooy")
            .done()
            .unwrap();

        let result = registry
            .define("ConstantFOOXY")
            .extends("ConstantFOOX")
            .extends("ConstantFOOY")
            .done();

        assert_rejected(
            result,
            Expectation::new(Rejection::Collision)
                .names(&["FOO"])
                .message_contains("ConstantFOOY"),
        );
        assert!(registry.get_type_by_name("ConstantFOOXY").is_none());
    }

    #[test]
    fn test_rebind_constant() {
        let mut registry = ConstantRegistry::new();
        registry
            .define("ConstantFOOX")
            .extends(ROOT_TYPE)
            .member("FOO", "foox")
            .done()
            .unwrap();

        let result = registry
            .define("ConstantFOOY")
            .extends("ConstantFOOX")
            .member("FOO", "fooy")
            .done();

        assert_rejected(result, Expectation::new(Rejection::Redefinition).names(&["FOO"]));
    }
}

mod worked_example {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declare_read_write_instantiate_redefine() {
        // GIVEN K { FOO: "foo", BAR: "bar" } under the default policy
        let mut registry = ConstantRegistry::new();
        let k = registry
            .define("K")
            .member("FOO", "foo")
            .member("BAR", "bar")
            .done()
            .unwrap();

        // THEN K.FOO reads back
        assert_eq!(registry.get_attr(k, "FOO"), Some(&Value::from("foo")));

        // AND writing K.FOO fails
        assert_rejected(
            registry.set_attr(k, "FOO", "x"),
            Expectation::new(Rejection::Assignment).names(&["FOO"]),
        );

        // AND K cannot be instantiated
        assert_rejected(registry.instantiate(k), Expectation::new(Rejection::Instantiation));

        // AND L(K) { FOO: "other" } is a redefinition
        let result = registry.define("L").extends("K").member("FOO", "other").done();
        assert_rejected(result, Expectation::new(Rejection::Redefinition).names(&["FOO"]));
    }
}
