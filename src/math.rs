use crate::*;
use nalgebra::{Isometry3, Translation3, UnitQuaternion};

pub struct LocalCoord {
    l2w: Isometry3<f32>,
    w2l: Isometry3<f32>,
}

impl LocalCoord {
    pub fn new_zy(o: &P3, z: &V3, y_like: &V3) -> Self {
        let tr = Translation3::from(o.coords);
        let rot = UnitQuaternion::face_towards(z, y_like);
        Self::from_iso(Isometry3::from_parts(tr, rot))
    }

    pub fn from_iso(l2w: Isometry3<f32>) -> Self {
        let w2l = l2w.inverse();
        LocalCoord { l2w, w2l }
    }

    //local to world
    pub fn l2w(&self) -> &Isometry3<f32> {
        &self.l2w
    }

    //world to local
    pub fn w2l(&self) -> &Isometry3<f32> {
        &self.w2l
    }
}

/// Orthonormal frame with `w` along a given direction. Rebuilt from
/// immutable inputs wherever it is needed, never cached.
#[derive(Clone, Debug)]
pub struct Onb {
    u: V3,
    v: V3,
    w: V3,
}

impl Onb {
    pub fn from_w(n: &V3) -> Self {
        let w = n.normalize();
        let helper = if w[0].abs() < 0.5 {
            V3::new(1.0, 0.0, 0.0)
        } else {
            V3::new(0.0, 1.0, 0.0)
        };
        let v = w.cross(&helper).normalize();
        let u = v.cross(&w);
        Onb { u, v, w }
    }

    pub fn w(&self) -> &V3 {
        &self.w
    }

    pub fn to_world(&self, a: &V3) -> V3 {
        self.u * a[0] + self.v * a[1] + self.w * a[2]
    }
}
