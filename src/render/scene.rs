//! Arena-stored transform tree for composed bodies.
//!
//! Agent bodies are little hierarchies (torso, head, jointed limbs). Nodes
//! live in one `Vec` and point at children by index, and the renderer gets
//! each node's cumulative world matrix (parent × T·Rx·Ry·Rz·S) from
//! `flatten`, parents first.
use raylib::prelude::{Color, Vector2, Vector3};

/// Index into a [`SceneTree`] arena. Ids stay valid for the tree's lifetime;
/// nodes are only ever added.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Clone, Copy)]
pub struct Transform {
    pub translation: Vector3,
    /// Euler angles in degrees, applied x then y then z.
    pub rotation: Vector3,
    pub scale: Vector3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::one(),
        }
    }

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self { translation: Vector3::new(x, y, z), ..Self::identity() }
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }
}

/// Column-major 4x4, the layout `rlMultMatrixf` expects.
#[derive(Clone, Copy)]
pub struct Mat4 {
    pub m: [f32; 16],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub fn mul(&self, rhs: &Mat4) -> Mat4 {
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.m[k * 4 + row] * rhs.m[col * 4 + k];
                }
                out[col * 4 + row] = sum;
            }
        }
        Mat4 { m: out }
    }

    /// Compose translate · rotate-x · rotate-y · rotate-z · scale.
    pub fn from_transform(t: &Transform) -> Mat4 {
        let translate = Mat4 {
            m: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                t.translation.x, t.translation.y, t.translation.z, 1.0,
            ],
        };
        let (sx, cx) = t.rotation.x.to_radians().sin_cos();
        let rot_x = Mat4 {
            m: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, cx, sx, 0.0, //
                0.0, -sx, cx, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        };
        let (sy, cy) = t.rotation.y.to_radians().sin_cos();
        let rot_y = Mat4 {
            m: [
                cy, 0.0, -sy, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                sy, 0.0, cy, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        };
        let (sz, cz) = t.rotation.z.to_radians().sin_cos();
        let rot_z = Mat4 {
            m: [
                cz, sz, 0.0, 0.0, //
                -sz, cz, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        };
        let scale = Mat4 {
            m: [
                t.scale.x, 0.0, 0.0, 0.0, //
                0.0, t.scale.y, 0.0, 0.0, //
                0.0, 0.0, t.scale.z, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        };
        translate.mul(&rot_x).mul(&rot_y).mul(&rot_z).mul(&scale)
    }

    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        Vector3::new(
            self.m[0] * p.x + self.m[4] * p.y + self.m[8] * p.z + self.m[12],
            self.m[1] * p.x + self.m[5] * p.y + self.m[9] * p.z + self.m[13],
            self.m[2] * p.x + self.m[6] * p.y + self.m[10] * p.z + self.m[14],
        )
    }

    pub fn as_array(&self) -> &[f32; 16] {
        &self.m
    }
}

/// What a node draws, if anything. Cubes are unit cubes of half-extent 1
/// before the node's scale applies.
#[derive(Clone, Copy)]
pub enum Shape {
    Group,
    Cube(Color),
}

pub struct Node {
    pub local: Transform,
    pub shape: Shape,
    pub visible: bool,
    children: Vec<NodeId>,
}

#[derive(Default)]
pub struct SceneTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, parent: Option<NodeId>, local: Transform, shape: Shape) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { local, shape, visible: true, children: Vec::new() });
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Cumulative world matrices, parents before children. An invisible
    /// node hides its whole subtree.
    pub fn flatten(&self) -> Vec<(NodeId, Mat4)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, Mat4)> =
            self.roots.iter().rev().map(|id| (id.0, Mat4::IDENTITY)).collect();
        while let Some((i, parent)) = stack.pop() {
            let node = &self.nodes[i];
            if !node.visible {
                continue;
            }
            let world = parent.mul(&Mat4::from_transform(&node.local));
            out.push((NodeId(i), world));
            for &child in node.children.iter().rev() {
                stack.push((child.0, world));
            }
        }
        out
    }
}

/// Anything the renderer can place in the world.
pub trait Renderable {
    /// (position, rotation in degrees, scale).
    fn render_transform(&self) -> (Vector3, Vector3, Vector3);
    fn is_active(&self) -> bool;
}

/// Joint handles into a person's body tree.
pub struct PersonRig {
    pub root: NodeId,
    arm_joint_l: NodeId,
    arm_joint_r: NodeId,
    leg_joint_l: NodeId,
    leg_joint_r: NodeId,
}

/// Build the standard body: torso and head on the root, arms and legs hung
/// off joint nodes so the swing angle rotates them around the shoulder/hip.
pub fn add_person(tree: &mut SceneTree, color: Color) -> PersonRig {
    let root = tree.add(None, Transform::identity(), Shape::Group);
    tree.add(
        Some(root),
        Transform::at(0.0, 0.1, 0.0).with_scale(0.15, 0.2, 0.25),
        Shape::Cube(color),
    );
    tree.add(
        Some(root),
        Transform::at(0.0, 0.5, 0.0).with_scale(0.25, 0.25, 0.25),
        Shape::Cube(color),
    );

    let arm_joint_l = tree.add(
        Some(root),
        Transform::at(0.0, 0.2, -0.3).with_rotation(0.0, 180.0, 0.0),
        Shape::Group,
    );
    tree.add(
        Some(arm_joint_l),
        Transform::at(0.0, -0.1, 0.0).with_scale(0.1, 0.2, 0.1),
        Shape::Cube(color),
    );
    let arm_joint_r = tree.add(Some(root), Transform::at(0.0, 0.2, 0.3), Shape::Group);
    tree.add(
        Some(arm_joint_r),
        Transform::at(0.0, -0.1, 0.0).with_scale(0.1, 0.2, 0.1),
        Shape::Cube(color),
    );

    let leg_joint_l = tree.add(
        Some(root),
        Transform::at(0.0, -0.1, 0.15).with_rotation(0.0, 180.0, 0.0),
        Shape::Group,
    );
    tree.add(
        Some(leg_joint_l),
        Transform::at(0.0, -0.15, 0.0).with_scale(0.1, 0.3, 0.1),
        Shape::Cube(color),
    );
    let leg_joint_r = tree.add(Some(root), Transform::at(0.0, -0.1, -0.15), Shape::Group);
    tree.add(
        Some(leg_joint_r),
        Transform::at(0.0, -0.15, 0.0).with_scale(0.1, 0.3, 0.1),
        Shape::Cube(color),
    );

    PersonRig { root, arm_joint_l, arm_joint_r, leg_joint_l, leg_joint_r }
}

/// Pose a rig from an agent's simulation state: world position, facing yaw
/// and the current limb swing (arms at 0.6 of the legs).
pub fn pose_person(tree: &mut SceneTree, rig: &PersonRig, pos: Vector2, rotation: f32, limb: f32) {
    let root = tree.node_mut(rig.root);
    root.local.translation = Vector3::new(pos.x, -0.5, pos.y);
    root.local.rotation = Vector3::new(0.0, rotation, 0.0);
    tree.node_mut(rig.leg_joint_r).local.rotation = Vector3::new(0.0, 0.0, limb);
    tree.node_mut(rig.leg_joint_l).local.rotation = Vector3::new(0.0, 180.0, limb);
    tree.node_mut(rig.arm_joint_r).local.rotation = Vector3::new(0.0, 0.0, limb * 0.6);
    tree.node_mut(rig.arm_joint_l).local.rotation = Vector3::new(0.0, 180.0, limb * 0.6);
}
