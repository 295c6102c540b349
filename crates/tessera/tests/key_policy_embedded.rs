use pretty_assertions::assert_eq;
use std::sync::Arc;
use tessera::{
    reflect::{Class, KeyType},
    schema::{AggregateMapping, Column, DirectMapping, ForeignReferenceMapping, Mapping},
    stmt::{Type, Value},
    Descriptor, KeyPolicy, Session,
};

fn employee_pk() -> Arc<Class> {
    Class::builder("EmployeePK")
        .field("deptId", Type::I64)
        .field("empNum", Type::I64)
        .build()
}

/// Embeddable EmployeeId { deptId, empNum }.
fn employee_id() -> Arc<Descriptor> {
    let class = Class::builder("EmployeeId")
        .field("deptId", Type::I64)
        .field("empNum", Type::I64)
        .build();

    Descriptor::aggregate_builder(&class)
        .mapping(DirectMapping::new("deptId", "DEPT_ID", Type::I64))
        .mapping(DirectMapping::new("empNum", "EMP_NUM", Type::I64))
        .build()
        .unwrap()
}

/// Employee { id: EmployeeId, name, dept }, keyed by `[DEPT_ID, EMP_NUM]`
/// through the embedded id. `dept` references the department through
/// `DEPT_ID` without writing it.
fn employee() -> Arc<Descriptor> {
    let class = Class::builder("Employee")
        .field("id", Type::Object("EmployeeId".into()))
        .field("name", Type::String)
        .field("dept", Type::Object("Department".into()))
        .build();

    Descriptor::builder(&class)
        .primary_key("DEPT_ID")
        .primary_key("EMP_NUM")
        .mapping(AggregateMapping::new("id", employee_id()))
        .mapping(DirectMapping::new("name", "NAME", Type::String))
        .mapping(
            Mapping::from(ForeignReferenceMapping::new(
                "dept",
                "Department",
                [Column::new("DEPT_ID")],
            ))
            .read_only(),
        )
        .build()
        .unwrap()
}

fn key(dept_id: i64, emp_num: i64) -> Value {
    employee_pk()
        .new_instance()
        .unwrap()
        .with("deptId", dept_id)
        .unwrap()
        .with("empNum", emp_num)
        .unwrap()
        .into()
}

#[test]
fn accessors_resolve_through_the_aggregate() {
    let policy = KeyPolicy::new(employee());
    let shape = policy.key_shape(&KeyType::from(employee_pk())).unwrap();

    let names: Vec<_> = shape
        .iter()
        .map(|(accessor, mapping)| (accessor.attribute_name(), mapping.attribute_name()))
        .collect();
    assert_eq!(names, [("deptId", "deptId"), ("empNum", "empNum")]);

    // Key mappings are the nested leaves, not the aggregate
    assert!(shape.mappings().iter().all(|mapping| mapping.is_direct_to_field()));
}

#[test]
fn embedded_key_vector() {
    let policy = KeyPolicy::new(employee());
    let record = policy
        .create_pk_vector_from_key(&key(3, 7), &Session::new())
        .unwrap();

    assert_eq!(record, [Value::I64(3), Value::I64(7)]);
}

#[test]
fn template_entity_creates_the_embedded_object() {
    let policy = KeyPolicy::new(employee());
    let entity = policy.create_bean_using_key(&key(3, 7)).unwrap();

    let id = entity.get("id").unwrap().expect_object();
    assert_eq!(id.class().name(), "EmployeeId");
    assert_eq!(id.get("deptId"), Some(&Value::I64(3)));
    assert_eq!(id.get("empNum"), Some(&Value::I64(7)));

    assert_eq!(entity.get("name"), Some(&Value::Null));
    assert_eq!(entity.get("dept"), Some(&Value::Null));
}

#[test]
fn embedded_round_trip() {
    let policy = KeyPolicy::new(employee());
    let session = Session::new();
    let key = key(3, 7);

    let expected = policy.create_pk_vector_from_key(&key, &session).unwrap();
    let entity = policy.create_bean_using_key(&key).unwrap();
    let rebuilt = policy.create_primary_key_instance(&entity).unwrap();

    assert_eq!(
        policy.create_pk_vector_from_key(&rebuilt, &session).unwrap(),
        expected
    );
}

#[test]
fn missing_embedded_object_yields_null_elements() {
    let policy = KeyPolicy::new(employee());
    policy.set_pk_class(employee_pk());

    let entity = employee().new_instance().unwrap();
    let rebuilt = policy.create_primary_key_instance(&entity).unwrap();

    let rebuilt = rebuilt.expect_object();
    assert_eq!(rebuilt.get("deptId"), Some(&Value::Null));
    assert_eq!(rebuilt.get("empNum"), Some(&Value::Null));
}

#[test]
fn scalar_derivation_through_the_aggregate() {
    let policy = KeyPolicy::new(employee());
    let accessors = policy.initialize_primary_key_fields(None).unwrap();

    assert_eq!(accessors.len(), 2);
    assert!(accessors.iter().all(|accessor| accessor.is_key_is_element()));
    assert_eq!(accessors[0].attribute_name(), "deptId");
    assert_eq!(accessors[1].attribute_name(), "empNum");
    assert_eq!(policy.pk_class().unwrap(), Some(KeyType::Scalar(Type::I64)));
}
