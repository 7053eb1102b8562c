use crate::rbx::prop::{PropertyType, PropertyValue};
use crate::rbx::{RbxError, Result};

/// Stable handle into the model's instance arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u32);

impl InstanceId {
	/// Return the arena index.
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

/// One named, typed property slot.
#[derive(Debug, Clone)]
pub struct Property {
	/// Property name.
	pub name: Box<str>,
	/// Type tag fixed on first assignment.
	pub ty: PropertyType,
	/// Decoded value.
	pub value: PropertyValue,
}

/// One reconstructed tree node.
#[derive(Debug, Clone)]
pub struct Instance {
	class_name: Box<str>,
	is_service: bool,
	properties: Vec<Property>,
	children: Vec<InstanceId>,
	parent: Option<InstanceId>,
}

impl Instance {
	/// Return the class name; immutable after creation.
	pub fn class_name(&self) -> &str {
		&self.class_name
	}

	/// Return whether the declaration chunk flagged this class as a service.
	pub fn is_service(&self) -> bool {
		self.is_service
	}

	/// Return properties in insertion order.
	pub fn properties(&self) -> &[Property] {
		&self.properties
	}

	/// Look up one property value by name.
	pub fn property(&self, name: &str) -> Option<&PropertyValue> {
		self.properties.iter().find(|slot| &*slot.name == name).map(|slot| &slot.value)
	}

	/// Return the display name: the `Name` property when it is valid UTF-8,
	/// the class name otherwise.
	pub fn name(&self) -> &str {
		if let Some(PropertyValue::String(bytes)) = self.property("Name")
			&& let Ok(text) = std::str::from_utf8(bytes)
		{
			return text;
		}
		&self.class_name
	}

	/// Return direct children in attachment order.
	pub fn children(&self) -> &[InstanceId] {
		&self.children
	}

	/// Return the parent handle; `None` for nodes attached to the root.
	pub fn parent(&self) -> Option<InstanceId> {
		self.parent
	}
}

/// The reconstructed scene graph: a flat instance arena plus the synthetic
/// root's child list.
///
/// The root is not itself an instance; it has no class and no properties,
/// only the ordered children attached to it.
#[derive(Debug, Default)]
pub struct Model {
	instances: Vec<Instance>,
	root_children: Vec<InstanceId>,
}

impl Model {
	/// Create an empty model.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of instances in the arena.
	pub fn len(&self) -> usize {
		self.instances.len()
	}

	/// Return whether the model holds no instances.
	pub fn is_empty(&self) -> bool {
		self.instances.is_empty()
	}

	/// Borrow one instance.
	pub fn get(&self, id: InstanceId) -> &Instance {
		&self.instances[id.index()]
	}

	/// Iterate every instance in declaration order with its handle.
	pub fn instances(&self) -> impl Iterator<Item = (InstanceId, &Instance)> {
		self.instances.iter().enumerate().map(|(index, item)| (InstanceId(index as u32), item))
	}

	/// Children attached directly under the synthetic root.
	pub fn root_children(&self) -> &[InstanceId] {
		&self.root_children
	}

	/// Append a bare skeleton instance and return its handle.
	pub(crate) fn new_instance(&mut self, class_name: &str, is_service: bool) -> InstanceId {
		let id = InstanceId(self.instances.len() as u32);
		self.instances.push(Instance {
			class_name: class_name.into(),
			is_service,
			properties: Vec::new(),
			children: Vec::new(),
			parent: None,
		});
		id
	}

	/// Assign a property, enforcing that a name keeps one type tag per parse.
	///
	/// Returns the slot index so deferred values can be patched later.
	pub(crate) fn set_property(&mut self, id: InstanceId, name: &str, ty: PropertyType, value: PropertyValue) -> Result<usize> {
		let instance = &mut self.instances[id.index()];
		if let Some(slot) = instance.properties.iter().position(|slot| &*slot.name == name) {
			let existing = &mut instance.properties[slot];
			if existing.ty != ty {
				return Err(RbxError::PropertyTypeConflict {
					name: name.to_owned(),
					expected: existing.ty.label(),
					got: ty.label(),
				});
			}
			existing.value = value;
			return Ok(slot);
		}

		instance.properties.push(Property {
			name: name.into(),
			ty,
			value,
		});
		Ok(instance.properties.len() - 1)
	}

	/// Overwrite a property slot resolved in the deferred pass.
	pub(crate) fn patch_property(&mut self, id: InstanceId, slot: usize, value: PropertyValue) {
		self.instances[id.index()].properties[slot].value = value;
	}

	/// Attach `child` under `parent`, or under the root for `None`.
	///
	/// The child is first detached from whichever children list currently
	/// holds it, so a node is in exactly one list at a time.
	pub fn set_parent(&mut self, child: InstanceId, parent: Option<InstanceId>) {
		self.detach(child);
		match parent {
			Some(parent) => {
				self.instances[parent.index()].children.push(child);
				self.instances[child.index()].parent = Some(parent);
			}
			None => {
				self.root_children.push(child);
				self.instances[child.index()].parent = None;
			}
		}
	}

	fn detach(&mut self, child: InstanceId) {
		match self.instances[child.index()].parent {
			Some(old) => {
				let siblings = &mut self.instances[old.index()].children;
				if let Some(at) = siblings.iter().position(|entry| *entry == child) {
					siblings.remove(at);
				}
			}
			None => {
				if let Some(at) = self.root_children.iter().position(|entry| *entry == child) {
					self.root_children.remove(at);
				}
			}
		}
	}

	/// Find the first child (optionally any descendant) with a given name.
	///
	/// `under: None` searches from the root.
	pub fn find_first_child(&self, under: Option<InstanceId>, name: &str, recursive: bool) -> Option<InstanceId> {
		self.find_first(under, recursive, &|item| item.name() == name)
	}

	/// Find the first child (optionally any descendant) of a given class.
	pub fn find_first_child_of_class(&self, under: Option<InstanceId>, class_name: &str, recursive: bool) -> Option<InstanceId> {
		self.find_first(under, recursive, &|item| item.class_name() == class_name)
	}

	fn find_first(&self, under: Option<InstanceId>, recursive: bool, matches: &dyn Fn(&Instance) -> bool) -> Option<InstanceId> {
		let children = match under {
			Some(id) => self.get(id).children(),
			None => self.root_children(),
		};

		for id in children {
			if matches(self.get(*id)) {
				return Some(*id);
			}
		}

		if recursive {
			for id in children {
				if let Some(found) = self.find_first(Some(*id), true, matches) {
					return Some(found);
				}
			}
		}

		None
	}

	/// Collect every descendant in depth-first order.
	pub fn descendants(&self, under: Option<InstanceId>) -> Vec<InstanceId> {
		let mut out = Vec::new();
		let children = match under {
			Some(id) => self.get(id).children(),
			None => self.root_children(),
		};
		for id in children {
			out.push(*id);
			out.extend(self.descendants(Some(*id)));
		}
		out
	}

	/// Dot-joined name path from the root to this instance.
	pub fn full_name(&self, id: InstanceId) -> String {
		let mut parts = vec![self.get(id).name().to_owned()];
		let mut current = self.get(id).parent();
		while let Some(parent) = current {
			parts.push(self.get(parent).name().to_owned());
			current = self.get(parent).parent();
		}
		parts.reverse();
		parts.join(".")
	}
}
