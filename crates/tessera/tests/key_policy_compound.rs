use pretty_assertions::assert_eq;
use std::sync::Arc;
use tessera::{
    reflect::{Class, KeyType, Method},
    schema::{Column, DirectMapping, Mapping},
    stmt::{Type, Value},
    AccessorKind, Descriptor, KeyPolicy, KeyShape, Session,
};

fn employee_pk() -> Arc<Class> {
    Class::builder("EmployeePK")
        .field("deptId", Type::I64)
        .field("empNum", Type::I64)
        .build()
}

/// EmployeePK exposing its elements through getters and setters only.
fn badge_pk() -> Arc<Class> {
    Class::builder("BadgePK")
        .property("deptId", "dept", Type::I64)
        .property("empNum", "num", Type::I64)
        .build()
}

/// Employee { deptId, empNum, name, legacyDept }, keyed by
/// `[DEPT_ID, EMP_NUM]`. `legacyDept` reads `DEPT_ID` as well.
fn employee() -> Arc<Descriptor> {
    let class = Class::builder("Employee")
        .field("deptId", Type::I64)
        .field("empNum", Type::I64)
        .field("name", Type::String)
        .field("legacyDept", Type::I64)
        .build();

    Descriptor::builder(&class)
        .primary_key("DEPT_ID")
        .primary_key("EMP_NUM")
        .mapping(DirectMapping::new("deptId", "DEPT_ID", Type::I64))
        .mapping(DirectMapping::new("empNum", "EMP_NUM", Type::I64))
        .mapping(DirectMapping::new("name", "NAME", Type::String))
        .mapping(Mapping::from(DirectMapping::new("legacyDept", "DEPT_ID", Type::I64)).read_only())
        .build()
        .unwrap()
}

fn key(class: &Arc<Class>, dept: &str, num: &str, values: (i64, i64)) -> Value {
    class
        .new_instance()
        .unwrap()
        .with(dept, values.0)
        .unwrap()
        .with(num, values.1)
        .unwrap()
        .into()
}

fn attribute_names(policy: &KeyPolicy, key_type: &KeyType) -> Vec<String> {
    policy
        .initialize_primary_key_fields(Some(key_type))
        .unwrap()
        .iter()
        .map(|accessor| accessor.attribute_name().to_string())
        .collect()
}

#[test]
fn key_class_fields_resolve_in_column_order() {
    let policy = KeyPolicy::new(employee());
    let accessors = policy
        .initialize_primary_key_fields(Some(&KeyType::from(employee_pk())))
        .unwrap();

    assert_eq!(accessors.len(), 2);
    assert!(accessors.iter().all(|accessor| accessor.is_field()));
    assert_eq!(accessors[0].attribute_name(), "deptId");
    assert_eq!(accessors[0].column(), &Column::new("DEPT_ID"));
    assert_eq!(accessors[1].attribute_name(), "empNum");
    assert_eq!(accessors[1].column(), &Column::new("EMP_NUM"));
}

#[test]
fn compound_key_vector() {
    let policy = KeyPolicy::new(employee());
    let pk = employee_pk();
    let key = key(&pk, "deptId", "empNum", (3, 7));

    let record = policy
        .create_pk_vector_from_key(&key, &Session::new())
        .unwrap();
    assert_eq!(record, [Value::I64(3), Value::I64(7)]);

    // The key is only read
    assert_eq!(key.expect_object().get("deptId"), Some(&Value::I64(3)));
}

#[test]
fn writable_mapping_is_preferred_over_read_only() {
    let policy = KeyPolicy::new(employee());
    assert_eq!(
        attribute_names(&policy, &KeyType::from(employee_pk())),
        ["deptId", "empNum"]
    );

    let legacy_pk = Class::builder("LegacyPK")
        .field("legacyDept", Type::I64)
        .field("empNum", Type::I64)
        .build();
    assert_eq!(
        attribute_names(&policy, &KeyType::from(legacy_pk)),
        ["legacyDept", "empNum"]
    );
}

#[test]
fn property_accessors_read_and_write_through_methods() {
    let policy = KeyPolicy::new(employee());
    let pk = badge_pk();
    let key = key(&pk, "dept", "num", (3, 7));

    let shape = policy.key_shape(&KeyType::from(&pk)).unwrap();
    assert!(shape.accessors().iter().all(|accessor| accessor.is_property()));

    let record = policy
        .create_pk_vector_from_key(&key, &Session::new())
        .unwrap();
    assert_eq!(record, [Value::I64(3), Value::I64(7)]);

    let entity = policy.create_bean_using_key(&key).unwrap();
    assert_eq!(entity.get("deptId"), Some(&Value::I64(3)));
    assert_eq!(entity.get("empNum"), Some(&Value::I64(7)));
    assert_eq!(entity.get("legacyDept"), Some(&Value::Null));

    let rebuilt = policy.create_primary_key_instance(&entity).unwrap();
    assert_eq!(rebuilt, key);
}

#[test]
fn template_entity_sets_only_key_attributes() {
    let policy = KeyPolicy::new(employee());
    let pk = employee_pk();

    let entity = policy
        .create_bean_using_key(&key(&pk, "deptId", "empNum", (3, 7)))
        .unwrap();

    assert_eq!(
        format!("{entity:?}"),
        "Employee { deptId: I64(3), empNum: I64(7), name: Null, legacyDept: Null }"
    );
}

#[test]
fn compound_round_trip() {
    let policy = KeyPolicy::new(employee());
    let session = Session::new();
    let pk = employee_pk();
    let key = key(&pk, "deptId", "empNum", (3, 7));

    let expected = policy.create_pk_vector_from_key(&key, &session).unwrap();
    let entity = policy.create_bean_using_key(&key).unwrap();
    let rebuilt = policy.create_primary_key_instance(&entity).unwrap();

    assert_eq!(rebuilt, key);
    assert_eq!(
        policy.create_pk_vector_from_key(&rebuilt, &session).unwrap(),
        expected
    );
}

#[test]
fn key_shape_is_computed_once() {
    let policy = KeyPolicy::new(employee());
    let key_type = KeyType::from(employee_pk());

    let first: *const KeyShape = policy.key_shape(&key_type).unwrap();
    let second: *const KeyShape = policy.key_shape(&key_type).unwrap();
    assert!(std::ptr::eq(first, second));

    // Later key types reuse the published shape
    let other = KeyType::from(badge_pk());
    let third: *const KeyShape = policy.key_shape(&other).unwrap();
    assert!(std::ptr::eq(first, third));
    assert_eq!(policy.key_class_fields(&other).unwrap().len(), 2);
}

#[test]
fn key_mappings_parallel_accessors() {
    let policy = KeyPolicy::new(employee());
    assert!(policy.key_mappings().is_none());

    let shape = policy.key_shape(&KeyType::from(employee_pk())).unwrap();
    assert_eq!(shape.len(), shape.mappings().len());

    for (accessor, mapping) in shape.iter() {
        assert_eq!(accessor.attribute_name(), mapping.attribute_name());
        assert!(!mapping.is_read_only());
    }
    assert_eq!(policy.key_mappings().unwrap().len(), 2);
}

#[test]
fn configured_pk_class_takes_precedence() {
    let policy = KeyPolicy::new(employee());
    let pk = employee_pk();
    policy.set_pk_class(&pk);

    let shape = policy.key_shape(&KeyType::from(badge_pk())).unwrap();
    assert_eq!(shape.key_type(), &KeyType::from(&pk));
    assert!(shape.accessors().iter().all(|accessor| accessor.is_field()));
    assert!(!shape.is_scalar());

    let instance = policy.pk_class_instance().unwrap().unwrap();
    assert_eq!(instance.get("deptId"), Some(&Value::Null));
}

#[test]
fn concurrent_first_use_publishes_one_shape() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KeyPolicy>();

    let policy = KeyPolicy::new(employee());
    let key_type = KeyType::from(employee_pk());

    let shapes: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                s.spawn(|| policy.key_shape(&key_type).unwrap() as *const KeyShape as usize)
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert!(shapes.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn getter_names_keep_attribute_casing() {
    let class = Class::builder("Badge")
        .field("deptID", Type::I64)
        .field("emp_no", Type::I64)
        .build();
    let descriptor = Descriptor::builder(&class)
        .primary_key("DEPT_ID")
        .primary_key("EMP_NO")
        .mapping(DirectMapping::new("deptID", "DEPT_ID", Type::I64))
        .mapping(DirectMapping::new("emp_no", "EMP_NO", Type::I64))
        .build()
        .unwrap();

    let pk = Class::builder("BadgeKey")
        .field("dept", Type::I64)
        .method(Method::getter("getDeptID", |key| Ok(key.get("dept").cloned().unwrap_or_default())))
        .method(Method::setter("setDeptID", |key, value| key.set("dept", value)))
        .property("emp_no", "num", Type::I64)
        .build();

    let policy = KeyPolicy::new(descriptor);
    let shape = policy.key_shape(&KeyType::from(&pk)).unwrap();
    let getters: Vec<_> = shape
        .accessors()
        .iter()
        .map(|accessor| match accessor.kind() {
            AccessorKind::Property(getter) => getter.name().to_string(),
            other => panic!("expected property accessor, got {other:?}"),
        })
        .collect();
    assert_eq!(getters, ["getDeptID", "getEmp_no"]);

    let key = key(&pk, "dept", "num", (3, 7));
    let record = policy
        .create_pk_vector_from_key(&key, &Session::new())
        .unwrap();
    assert_eq!(record, [Value::I64(3), Value::I64(7)]);

    let entity = policy.create_bean_using_key(&key).unwrap();
    assert_eq!(policy.create_primary_key_instance(&entity).unwrap(), key);
}
