//! STEP (ISO 10303-21) export
//!
//! Writes one `FACETED_BREP` per box under the `CONFIG_CONTROL_DESIGN`
//! schema. Lengths are inches, declared as a conversion-based unit over
//! millimetres.

use crate::Result;
use crate::geometry::Aabb;
use glam::DVec3;
use std::io::Write;

/// One box solid to be written
#[derive(Debug, Clone, PartialEq)]
pub struct StepSolid {
    pub name: String,
    pub bounds: Aabb,
}

/// Accumulates numbered entity instances
struct StepWriter {
    data: String,
    next_id: usize,
}

impl StepWriter {
    fn new() -> Self {
        Self {
            data: String::new(),
            next_id: 1,
        }
    }

    fn add(&mut self, entity: impl AsRef<str>) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.data.push_str(&format!("#{id}={};\n", entity.as_ref()));
        id
    }

    fn point(&mut self, p: DVec3) -> usize {
        self.add(format!(
            "CARTESIAN_POINT('',({},{},{}))",
            real(p.x),
            real(p.y),
            real(p.z)
        ))
    }

    fn direction(&mut self, d: DVec3) -> usize {
        self.add(format!(
            "DIRECTION('',({},{},{}))",
            real(d.x),
            real(d.y),
            real(d.z)
        ))
    }

    fn placement(&mut self, origin: DVec3, axis: DVec3, reference: DVec3) -> usize {
        let origin = self.point(origin);
        let axis = self.direction(axis);
        let reference = self.direction(reference);
        self.add(format!("AXIS2_PLACEMENT_3D('',#{origin},#{axis},#{reference})"))
    }

    /// Product structure, units and the geometric context. Returns the
    /// product definition shape and the representation context.
    fn preamble(&mut self, product: &str) -> (usize, usize) {
        let name = quote(product);
        let app = self.add(
            "APPLICATION_CONTEXT('configuration controlled 3D designs of mechanical parts and assemblies')",
        );
        self.add(format!(
            "APPLICATION_PROTOCOL_DEFINITION('international standard','config_control_design',1994,#{app})"
        ));
        let mech = self.add(format!("MECHANICAL_CONTEXT('',#{app},'mechanical')"));
        let prod = self.add(format!("PRODUCT({name},{name},'',(#{mech}))"));
        let formation = self.add(format!("PRODUCT_DEFINITION_FORMATION('','',#{prod})"));
        let design = self.add(format!("DESIGN_CONTEXT('',#{app},'design')"));
        let definition = self.add(format!(
            "PRODUCT_DEFINITION('design','',#{formation},#{design})"
        ));
        let shape = self.add(format!("PRODUCT_DEFINITION_SHAPE('','',#{definition})"));

        let mm = self.add("(LENGTH_UNIT()NAMED_UNIT(*)SI_UNIT(.MILLI.,.METRE.))");
        let inch_factor = self.add(format!(
            "LENGTH_MEASURE_WITH_UNIT(LENGTH_MEASURE(25.4),#{mm})"
        ));
        let exponents = self.add("DIMENSIONAL_EXPONENTS(1.,0.,0.,0.,0.,0.,0.)");
        let inch = self.add(format!(
            "(CONVERSION_BASED_UNIT('INCH',#{inch_factor})LENGTH_UNIT()NAMED_UNIT(#{exponents}))"
        ));
        let radian = self.add("(NAMED_UNIT(*)PLANE_ANGLE_UNIT()SI_UNIT($,.RADIAN.))");
        let steradian = self.add("(NAMED_UNIT(*)SI_UNIT($,.STERADIAN.)SOLID_ANGLE_UNIT())");
        let uncertainty = self.add(format!(
            "UNCERTAINTY_MEASURE_WITH_UNIT(LENGTH_MEASURE(1.E-06),#{inch},'distance_accuracy_value','confusion accuracy')"
        ));
        let context = self.add(format!(
            "(GEOMETRIC_REPRESENTATION_CONTEXT(3)\
             GLOBAL_UNCERTAINTY_ASSIGNED_CONTEXT((#{uncertainty}))\
             GLOBAL_UNIT_ASSIGNED_CONTEXT((#{inch},#{radian},#{steradian}))\
             REPRESENTATION_CONTEXT('',''))"
        ));
        (shape, context)
    }

    fn faceted_brep(&mut self, solid: &StepSolid) -> usize {
        let mut faces = Vec::with_capacity(6);
        for face in solid.bounds.faces() {
            let corners: Vec<String> = face
                .corners()
                .into_iter()
                .map(|c| format!("#{}", self.point(c)))
                .collect();
            let poly = self.add(format!("POLY_LOOP('',({}))", corners.join(",")));
            let bound = self.add(format!("FACE_OUTER_BOUND('',#{poly},.T.)"));
            let frame = self.placement(face.origin, face.normal(), face.u.normalize_or_zero());
            let plane = self.add(format!("PLANE('',#{frame})"));
            faces.push(self.add(format!("FACE_SURFACE('',(#{bound}),#{plane},.T.)")));
        }
        let shell = self.add(format!("CLOSED_SHELL('',({}))", refs(&faces)));
        self.add(format!("FACETED_BREP({},#{shell})", quote(&solid.name)))
    }
}

/// Write `solids` as a single product named `product`
pub fn write_step<W: Write>(product: &str, solids: &[StepSolid], writer: &mut W) -> Result<()> {
    let mut step = StepWriter::new();
    let (shape, context) = step.preamble(product);

    let mut items: Vec<usize> = solids.iter().map(|s| step.faceted_brep(s)).collect();
    items.push(step.placement(DVec3::ZERO, DVec3::Z, DVec3::X));
    let representation = step.add(format!(
        "FACETED_BREP_SHAPE_REPRESENTATION({},({}),#{context})",
        quote(product),
        refs(&items)
    ));
    step.add(format!(
        "SHAPE_DEFINITION_REPRESENTATION(#{shape},#{representation})"
    ));

    writeln!(writer, "ISO-10303-21;")?;
    writeln!(writer, "HEADER;")?;
    writeln!(writer, "FILE_DESCRIPTION(('flat-pack furniture faceted brep'),'2;1');")?;
    writeln!(
        writer,
        "FILE_NAME({},'',(''),(''),'flatpack','flatpack','');",
        quote(product)
    )?;
    writeln!(writer, "FILE_SCHEMA(('CONFIG_CONTROL_DESIGN'));")?;
    writeln!(writer, "ENDSEC;")?;
    writeln!(writer, "DATA;")?;
    writer.write_all(step.data.as_bytes())?;
    writeln!(writer, "ENDSEC;")?;
    writeln!(writer, "END-ISO-10303-21;")?;
    writer.flush()?;
    Ok(())
}

/// A STEP real always carries a decimal point
fn real(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    let s = format!("{v}");
    if s.contains('.') || s.contains('e') {
        s.replace('e', "E")
    } else {
        format!("{s}.")
    }
}

/// A STEP string literal; apostrophes are doubled
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn refs(ids: &[usize]) -> String {
    ids.iter().map(|id| format!("#{id}")).collect::<Vec<_>>().join(",")
}
