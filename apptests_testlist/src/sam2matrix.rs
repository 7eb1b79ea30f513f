// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use apptests_core::{BinarySpec, Programs, Result, Suite, TestConf, TestPathHelper};

pub struct Sam2Matrix;

const BINARIES: [BinarySpec; 1] = [BinarySpec {
    subpath: "extras/apps/sam2matrix",
    name: "sam2matrix",
}];

impl Suite for Sam2Matrix {
    fn name(&self) -> &'static str {
        "sam2matrix"
    }

    fn tests_dir(&self) -> &'static str {
        "extras/apps/sam2matrix/tests"
    }

    fn binaries(&self) -> &'static [BinarySpec] {
        &BINARIES
    }

    // Two SAM files against a mixed read set.  The -gf values are genome labels written into
    // the matrix header, not paths, so they stay bare.

    fn build_cases(&self, ph: &TestPathHelper, programs: &Programs) -> Result<Vec<TestConf>> {
        Ok(vec![TestConf::new(programs.get("sam2matrix")?)
            .redir_stdout(ph.out_file("out.stdout"))
            .arg("-sf")
            .arg(ph.in_file("ecoli.sam"))
            .arg("-sf")
            .arg(ph.in_file("ehec.sam"))
            .arg("-rf")
            .arg(ph.in_file("ecoli_0.50_ehec_0.50.fastq"))
            .args(["-gf", "ecoli.fasta", "-gf", "ehec.fasta", "-o"])
            .arg(ph.out_file("test_sam2matrix.csv"))
            .diff(ph.in_file("out.stdout"), ph.out_file("out.stdout"))
            .diff(ph.in_file("gold.csv"), ph.out_file("test_sam2matrix.csv"))])
    }
}
